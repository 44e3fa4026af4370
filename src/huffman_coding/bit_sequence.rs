use crate::error::{HuffError, Result};

/// A bounded sequence of bits. Used as a stack while walking the tree, and as the stored code
/// for a symbol once the walk reaches that symbol's leaf.
///
/// Bits are packed eight to a byte, bit `i` living at bit position `i % 8` of byte `i / 8`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSequence {
    /// Packed bits. Bits at or beyond `len` are always zero.
    bits: Vec<u8>,
    /// Count of valid bits.
    len: usize,
    /// Maximum number of bits this sequence will hold.
    capacity: usize,
}

impl BitSequence {
    /// Create an empty sequence that can hold up to `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity((capacity + 7) / 8),
            len: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a bit onto the tail of the sequence. Fails when the sequence is full.
    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        if self.is_full() {
            return Err(HuffError::Full {
                what: "bit sequence",
                capacity: self.capacity,
            });
        }
        let byte = self.len / 8;
        if byte == self.bits.len() {
            self.bits.push(0);
        }
        if bit {
            self.bits[byte] |= 1 << (self.len % 8);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last bit, or None if the sequence is empty.
    pub fn pop_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let byte = self.len / 8;
        let mask = 1 << (self.len % 8);
        let bit = self.bits[byte] & mask != 0;
        // Keep the unused tail clear so equality compares only valid bits
        self.bits[byte] &= !mask;
        if self.len % 8 == 0 {
            self.bits.pop();
        }
        Some(bit)
    }

    /// Read bit `i`, or None if `i` is past the end.
    pub fn get(&self, i: usize) -> Option<bool> {
        if i >= self.len {
            return None;
        }
        Some(self.bits[i / 8] >> (i % 8) & 1 == 1)
    }

    /// Iterate over the bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bits[i / 8] >> (i % 8) & 1 == 1)
    }

    /// True if every bit of `self` matches the start of `other`.
    pub fn is_prefix_of(&self, other: &BitSequence) -> bool {
        self.len <= other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl std::fmt::Display for BitSequence {
    /// Prints the bits as 0s and 1s, with a space between each group of eight.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, bit) in self.iter().enumerate() {
            if i > 0 && i % 8 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", bit as u8)?;
        }
        Ok(())
    }
}
