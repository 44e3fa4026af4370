use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};

use log::{debug, error, info, warn};

use super::header::Header;
use super::permissions::apply_permissions;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::node::NodeData;
use crate::huffman_coding::tree_codec::rebuild_tree;
use crate::tools::cli::HuffOpts;
use crate::tools::counter::CountingReader;
use crate::tools::report::{decompress_report, report};

/// What a decode session produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    pub header: Header,
    /// Bytes consumed from the compressed input.
    pub compressed_size: u64,
    /// Bytes written to the output.
    pub decompressed_size: u64,
}

/// Decode everything after the header: the tree, then the payload.
///
/// The reader must be positioned right after a header that has already been validated.
/// Returns the number of bytes written, which always equals `header.file_size` on success.
pub fn decode_body<R: Read, W: Write>(header: &Header, reader: &mut R, writer: W) -> Result<u64> {
    let mut tokens = vec![0_u8; header.tree_size as usize];
    reader.read_exact(&mut tokens).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => HuffError::corrupt("file ends inside the tree"),
        _ => HuffError::Io(e),
    })?;
    let root = rebuild_tree(&tokens)?;
    debug!("Rebuilt tree with {} leaves.", root.leaf_count());

    if root.is_leaf() && header.file_size > 0 {
        error!("Tree has a single leaf, which codes nothing.");
        return Err(HuffError::corrupt("tree has no internal nodes"));
    }

    let mut out = BufWriter::new(writer);
    let mut br = BitReader::new(&mut *reader);
    let mut produced = 0_u64;
    let mut node = &root;

    // Walk down one edge per bit. Reaching a leaf emits its symbol and starts over at the root.
    while produced < header.file_size {
        let bit = match br.bool_bit()? {
            Some(bit) => bit,
            None => {
                error!(
                    "Ran out of bits at {} after {} of {} bytes.",
                    br.loc(),
                    produced,
                    header.file_size
                );
                return Err(HuffError::Truncated {
                    expected: header.file_size,
                    produced,
                });
            }
        };
        node = match &node.node_data {
            NodeData::Kids(left, right) => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // The cursor goes back to the (internal) root whenever it lands on a leaf
            NodeData::Leaf(_) => return Err(HuffError::corrupt("descended past a leaf")),
        };
        if let NodeData::Leaf(sym) = node.node_data {
            out.write_all(&[sym])?;
            produced += 1;
            node = &root;
        }
    }
    out.flush()?;
    let payload = br.bytes_read();

    // The flush byte (and anything after it) is never needed for the symbols, but it is part
    // of the compressed size
    let rest = io::copy(reader, &mut io::sink())?;
    if rest > 1 {
        warn!("Ignored {} bytes after the payload.", rest);
    }
    info!(
        "Decoded {} bytes from {} payload bytes.",
        produced,
        payload + rest
    );
    Ok(produced)
}

/// Decompress a whole stream: header, tree and payload. Nothing is written unless the header is
/// valid.
pub fn decode<R: Read, W: Write>(reader: R, writer: W) -> Result<DecodeSummary> {
    let mut reader = CountingReader::new(reader);
    let header = Header::read_from(&mut reader)?;
    let decompressed_size = decode_body(&header, &mut reader, writer)?;
    Ok(DecodeSummary {
        header,
        compressed_size: reader.count(),
        decompressed_size,
    })
}

/// Decompress a slice in memory. Returns the header (for its permissions) and the data.
pub fn decompress_bytes(data: &[u8]) -> Result<(Header, Vec<u8>)> {
    let mut out = Vec::new();
    let summary = decode(data, &mut out)?;
    Ok((summary.header, out))
}

/// Decompress the input named in opts (or stdin) to the output named in opts (or stdout).
pub fn decompress(opts: &HuffOpts) -> Result<DecodeSummary> {
    let summary = match &opts.input {
        Some(name) => {
            let fin = File::open(name).map_err(|e| {
                error!("Couldn't open {}: {}", name, e);
                e
            })?;
            decode_to_output(BufReader::new(fin), opts)?
        }
        None => decode_to_output(BufReader::new(io::stdin().lock()), opts)?,
    };

    if opts.stats {
        report(decompress_report(
            summary.compressed_size,
            summary.decompressed_size,
        ));
    }
    Ok(summary)
}

fn decode_to_output<R: Read>(reader: R, opts: &HuffOpts) -> Result<DecodeSummary> {
    let mut reader = CountingReader::new(reader);
    // Validate the header before anything is created
    let header = Header::read_from(&mut reader)?;

    let decompressed_size = match &opts.output {
        Some(name) => {
            let fout = File::create(name).map_err(|e| {
                error!("Couldn't create {}: {}", name, e);
                e
            })?;
            apply_permissions(&fout, header.permissions)?;
            let result = decode_body(&header, &mut reader, fout);
            if result.is_err() {
                warn!("Removing partial output {}.", name);
                if let Err(e) = fs::remove_file(name) {
                    warn!("Couldn't remove {}: {}", name, e);
                }
            }
            result?
        }
        None => decode_body(&header, &mut reader, io::stdout().lock())?,
    };

    Ok(DecodeSummary {
        header,
        compressed_size: reader.count(),
        decompressed_size,
    })
}

#[cfg(test)]
mod test {
    use super::{decode, decompress, decompress_bytes};
    use crate::compression::compress::{compress, compress_bytes};
    use crate::compression::header::HEADER_SIZE;
    use crate::error::HuffError;
    use crate::tools::cli::{HuffOpts, Mode};

    fn round_trip(data: &[u8]) {
        let packed = compress_bytes(data, 0o640).unwrap();
        let (header, unpacked) = decompress_bytes(&packed).unwrap();
        assert_eq!(unpacked, data);
        assert_eq!(header.permissions, 0o640);
        assert_eq!(header.file_size, data.len() as u64);
    }

    #[test]
    fn round_trip_test() {
        round_trip(b"");
        round_trip(b"A");
        round_trip(b"AAAA");
        round_trip(b"\x00\x01\x00\x01");
        round_trip(b"It was the best of times, it was the worst of times.");
        round_trip(&(0..=255u8).collect::<Vec<u8>>());
        round_trip(&(0..=255u8).rev().cycle().take(5000).collect::<Vec<u8>>());
    }

    #[test]
    fn skewed_round_trip_test() {
        // Doubling counts push code lengths well past a byte
        let mut data = Vec::new();
        for sym in 0..20u8 {
            data.extend(std::iter::repeat(sym + 100).take(1 << sym));
        }
        round_trip(&data);
    }

    #[test]
    fn byte_aligned_payload_test() {
        // "AAAAAAAA": eight 1 bit codes fill exactly one byte before the flush byte
        let packed = compress_bytes(b"AAAAAAAA", 0o644).unwrap();
        assert_eq!(&packed[HEADER_SIZE + 8..], &[0xff, 0x00]);
        round_trip(b"AAAAAAAA");
    }

    #[test]
    fn empty_test() {
        let packed = compress_bytes(b"", 0o644).unwrap();
        let mut out = Vec::new();
        let summary = decode(packed.as_slice(), &mut out).unwrap();
        assert_eq!(summary.header.tree_size, 5);
        assert_eq!(summary.decompressed_size, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn bad_magic_test() {
        let mut packed = compress_bytes(b"some data", 0o644).unwrap();
        packed[1] ^= 0x5a;
        let mut out = Vec::new();
        let result = decode(packed.as_slice(), &mut out);
        assert!(matches!(result, Err(HuffError::Corrupt(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_payload_test() {
        let data = b"a longer sentence so the payload spans several bytes";
        let packed = compress_bytes(data, 0o644).unwrap();
        let cut = &packed[..packed.len() - 4];
        match decompress_bytes(cut) {
            Err(HuffError::Truncated { expected, produced }) => {
                assert_eq!(expected, data.len() as u64);
                assert!(produced < expected);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn truncated_tree_test() {
        let packed = compress_bytes(b"abc", 0o644).unwrap();
        assert!(matches!(
            decompress_bytes(&packed[..HEADER_SIZE + 3]),
            Err(HuffError::Corrupt(_))
        ));
    }

    #[test]
    fn corrupt_tree_test() {
        let mut packed = compress_bytes(b"abc", 0o644).unwrap();
        // First token of the tree is always a leaf marker
        packed[HEADER_SIZE] = b'?';
        assert!(matches!(
            decompress_bytes(&packed),
            Err(HuffError::Corrupt(_))
        ));
    }

    #[test]
    fn summary_counts_test() {
        let data = b"counting the bytes on both sides";
        let packed = compress_bytes(data, 0o644).unwrap();
        let mut out = Vec::new();
        let summary = decode(packed.as_slice(), &mut out).unwrap();
        assert_eq!(summary.decompressed_size, data.len() as u64);
        assert_eq!(summary.compressed_size, packed.len() as u64);
    }

    #[test]
    fn summary_counts_flush_byte_test() {
        // Byte aligned and empty payloads finish before the decoder needs the zero flush byte
        for data in [&b"AAAAAAAA"[..], &b""[..], &b"AAAA"[..]] {
            let packed = compress_bytes(data, 0o644).unwrap();
            let mut out = Vec::new();
            let summary = decode(packed.as_slice(), &mut out).unwrap();
            assert_eq!(summary.compressed_size, packed.len() as u64);
            assert_eq!(summary.decompressed_size, data.len() as u64);
        }
    }

    #[test]
    fn file_round_trip_test() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        let packed = dir.path().join("plain.huf");
        let unpacked = dir.path().join("plain.out");
        let data: Vec<u8> = b"Peter Piper picked a peck of pickled peppers. "
            .iter()
            .cycle()
            .take(10_000)
            .copied()
            .collect();
        std::fs::write(&plain, &data).unwrap();

        let zip = HuffOpts {
            op_mode: Mode::Zip,
            input: Some(plain.to_string_lossy().into_owned()),
            output: Some(packed.to_string_lossy().into_owned()),
            ..HuffOpts::new()
        };
        compress(&zip).unwrap();

        let unzip = HuffOpts {
            op_mode: Mode::Unzip,
            input: Some(packed.to_string_lossy().into_owned()),
            output: Some(unpacked.to_string_lossy().into_owned()),
            ..HuffOpts::new()
        };
        let summary = decompress(&unzip).unwrap();
        assert_eq!(summary.decompressed_size, 10_000);
        assert_eq!(std::fs::read(&unpacked).unwrap(), data);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let src = std::fs::metadata(&plain).unwrap().permissions().mode();
            let dst = std::fs::metadata(&unpacked).unwrap().permissions().mode();
            assert_eq!(src & 0o7777, dst & 0o7777);
        }
    }

    #[test]
    fn bad_file_leaves_no_output_test() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.huf");
        let out = dir.path().join("bad.out");
        std::fs::write(&bad, b"definitely not a compressed file").unwrap();

        let unzip = HuffOpts {
            op_mode: Mode::Unzip,
            input: Some(bad.to_string_lossy().into_owned()),
            output: Some(out.to_string_lossy().into_owned()),
            ..HuffOpts::new()
        };
        assert!(matches!(decompress(&unzip), Err(HuffError::Corrupt(_))));
        assert!(!out.exists());
    }

    #[test]
    fn truncated_file_removed_test() {
        let dir = tempfile::tempdir().unwrap();
        let cut = dir.path().join("cut.huf");
        let out = dir.path().join("cut.out");
        let packed = compress_bytes(&[7u8, 8, 9].repeat(100), 0o644).unwrap();
        std::fs::write(&cut, &packed[..packed.len() - 10]).unwrap();

        let unzip = HuffOpts {
            op_mode: Mode::Unzip,
            input: Some(cut.to_string_lossy().into_owned()),
            output: Some(out.to_string_lossy().into_owned()),
            ..HuffOpts::new()
        };
        assert!(matches!(decompress(&unzip), Err(HuffError::Truncated { .. })));
        assert!(!out.exists());
    }
}
