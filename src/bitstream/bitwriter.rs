use std::io::Write;

use crate::huffman_coding::bit_sequence::BitSequence;

/// Packs codes into bytes and writes them out. Bits fill each byte from the least significant
/// bit up, and a byte goes to the writer as soon as its eighth bit arrives.
pub struct BitWriter<W> {
    /// Byte being filled.
    queue: u8,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Count of bytes handed to the writer so far.
    written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Put a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) -> std::io::Result<()> {
        if bit {
            self.queue |= 1 << self.q_bits;
        }
        self.q_bits += 1;
        if self.q_bits == 8 {
            self.push_queue()?;
        }
        Ok(())
    }

    /// Put all bits of a code on the stream, in index order.
    pub fn write_code(&mut self, code: &BitSequence) -> std::io::Result<()> {
        for bit in code.iter() {
            self.out_bit(bit)?;
        }
        Ok(())
    }

    /// Write the queue byte out and start a fresh one.
    fn push_queue(&mut self) -> std::io::Result<()> {
        self.writer.write_all(&[self.queue])?;
        self.written += 1;
        self.queue = 0;
        self.q_bits = 0;
        Ok(())
    }

    /// Write the pending bits (0-7) as one byte, padded with 0s in the unused high bits.
    /// Flush always writes exactly one byte: with nothing pending it writes a zero byte, so it
    /// must be called once, at the end of the stream.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.push_queue()?;
        self.writer.flush()
    }

    /// Bytes written so far, not counting bits still in the queue.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.written, self.q_bits)
    }

    /// Give back the underlying writer. Unflushed bits are lost.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
