//! A static Huffman file compressor.
//!
//! Version 0.1.0
//!
//! Counts the bytes of a file, builds a Huffman tree for that distribution, and writes the tree
//! followed by the code of every byte. Decompression rebuilds the tree from the file and walks it
//! bit by bit. The original file's permissions travel in the header and are restored.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huff -i test.txt -o test.huf`
//!
//! and to get it back:
//!
//! `$> huff -d -i test.huf -o test.txt`
//!
//! With no `-i` or `-o`, standard input and standard output are used. `-s` prints size
//! statistics to stderr.
//!
//! In memory, [`compression::compress::compress_bytes`] and
//! [`compression::decompress::decompress_bytes`] do the same thing on slices.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
