use std::io::{ErrorKind, Read, Write};

use log::{error, info};

use crate::error::{HuffError, Result};
use crate::huffman_coding::tree_codec::tree_size;

/// Identifies a compressed file.
pub const MAGIC: u32 = 0xBEEF_D00D;
/// Bytes in an encoded header.
pub const HEADER_SIZE: usize = 16;
/// Largest possible serialized tree: every byte value is a leaf.
pub const MAX_TREE_SIZE: u16 = 767;

/// The fixed record at the start of every compressed file. Stored little-endian in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    /// Mode bits of the original file, restored on decompression.
    pub permissions: u16,
    /// Length of the serialized tree that follows the header.
    pub tree_size: u16,
    /// Length of the original file.
    pub file_size: u64,
}

impl Header {
    pub fn new(permissions: u16, tree_size: u16, file_size: u64) -> Self {
        Self {
            magic: MAGIC,
            permissions,
            tree_size,
            file_size,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..6].copy_from_slice(&self.permissions.to_le_bytes());
        out[6..8].copy_from_slice(&self.tree_size.to_le_bytes());
        out[8..16].copy_from_slice(&self.file_size.to_le_bytes());
        out
    }

    /// Decode a header without checking it.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        // The slices are fixed width, so the conversions cannot fail
        let mut magic = [0u8; 4];
        let mut permissions = [0u8; 2];
        let mut tree_size = [0u8; 2];
        let mut file_size = [0u8; 8];
        magic.copy_from_slice(&bytes[0..4]);
        permissions.copy_from_slice(&bytes[4..6]);
        tree_size.copy_from_slice(&bytes[6..8]);
        file_size.copy_from_slice(&bytes[8..16]);
        Self {
            magic: u32::from_le_bytes(magic),
            permissions: u16::from_le_bytes(permissions),
            tree_size: u16::from_le_bytes(tree_size),
            file_size: u64::from_le_bytes(file_size),
        }
    }

    /// Check the magic number and that the tree size is one a real tree could have.
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            error!("Header doesn't match magic number: 0x{:08x}", self.magic);
            return Err(HuffError::corrupt(format!(
                "bad magic number 0x{:08x}",
                self.magic
            )));
        }
        // Sizes are 3u - 1 for u leaves, u between 1 and 256
        let size = self.tree_size;
        if size < 2 || size > MAX_TREE_SIZE || (size as usize + 1) % 3 != 0 {
            error!("Header has an impossible tree size: {}", size);
            return Err(HuffError::corrupt(format!("impossible tree size {}", size)));
        }
        debug_assert_eq!(tree_size((size as usize + 1) / 3), size as usize);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Read and validate a header. A short read is a corrupt file, not an I/O failure.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => HuffError::corrupt("file too short for a header"),
            _ => HuffError::Io(e),
        })?;
        let header = Self::from_bytes(&bytes);
        header.validate()?;
        info!(
            "Found a valid header: tree {} bytes, original {} bytes, mode {:o}.",
            header.tree_size, header.file_size, header.permissions
        );
        Ok(header)
    }
}
