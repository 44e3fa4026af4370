//! BitReader: reads the packed payload of a compressed file one bit at a time.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. It pulls one
//! byte at a time, so wrap files in a BufReader.
//!

use std::io::{ErrorKind, Read};

/// Reads bits least significant bit first, refilling a one byte lookahead as needed.
#[derive(Debug)]
pub struct BitReader<R> {
    /// Current byte.
    buffer: u8,
    /// Next bit to hand out from the buffer. 8 means the buffer is used up.
    bit_index: u8,
    /// Count of bytes pulled from the source.
    consumed: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            buffer: 0,
            bit_index: 8,
            consumed: 0,
            source,
        }
    }

    /// Refill the buffer. Returns false if the source has no more data.
    fn have_data(&mut self) -> std::io::Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.buffer = byte[0];
        self.bit_index = 0;
        self.consumed += 1;
        Ok(true)
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read.
    pub fn bit(&mut self) -> std::io::Result<Option<u8>> {
        if self.bit_index == 8 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer >> self.bit_index) & 1;
        self.bit_index += 1;
        Ok(Some(bit))
    }

    /// Return *true* if the next bit is 1, *false* if 0, or None if there is no more data.
    pub fn bool_bit(&mut self) -> std::io::Result<Option<bool>> {
        Ok(self.bit()?.map(|bit| bit == 1))
    }

    /// Bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.consumed
    }

    /// Debugging function. Report current position as bytes.bits consumed.
    pub fn loc(&self) -> String {
        if self.bit_index == 8 {
            format!("[{}.0]", self.consumed)
        } else {
            format!("[{}.{}]", self.consumed - 1, self.bit_index)
        }
    }
}
