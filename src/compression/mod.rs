//! The compression module runs whole encode and decode sessions.
//!
//! A compressed file is laid out as:
//! - Header: 16 bytes. Magic number, the original file's permission bits, the length of the
//!   serialized tree, and the length of the original file.
//! - Tree: the post-order token stream written by `tree_codec`, exactly `tree_size` bytes.
//! - Payload: the code of every input byte in input order, packed least significant bit first
//!   and closed by one zero-padded flush byte.
//!
//! Compression reads its input twice (once for the histogram, once to emit codes), so it needs a
//! seekable source. Standard input is staged in memory first. Decompression is a single pass.
//! The tree lives only for the length of one session.
//!

pub mod compress;
pub mod decompress;
pub mod header;
pub mod permissions;
