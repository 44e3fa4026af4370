use std::io::{ErrorKind, Read};

use crate::huffman_coding::huffman::ALPHABET;

/// Byte counts of an input, plus the total number of bytes seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    pub counts: [u64; ALPHABET],
    pub total: u64,
}

impl Histogram {
    /// Number of distinct byte values present.
    pub fn symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// Returns a frequency count of everything left in the reader.
pub fn histogram<R: Read>(reader: &mut R) -> std::io::Result<Histogram> {
    let mut counts = [0_u64; ALPHABET];
    let mut total = 0_u64;
    let mut buf = vec![0_u8; 64 * 1024];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        buf[..n].iter().for_each(|&el| counts[el as usize] += 1);
        total += n as u64;
    }
    Ok(Histogram { counts, total })
}
