//! The bitstream module forms the I/O subsystem for the payload of a compressed file.
//!
//! Codes are packed least significant bit first: the first bit of the first code lands in bit 0
//! of the first payload byte. The writer always ends the payload with exactly one flush byte,
//! zero padded, so the payload is a whole number of bytes.
//!
//! Neither side knows anything about trees. The decoder pulls bits from the reader and walks the
//! tree itself.
//!
pub mod bitreader;
pub mod bitwriter;
