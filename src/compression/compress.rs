use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use log::{debug, error, info, warn};

use super::header::Header;
use super::permissions::{apply_permissions, file_permissions, DEFAULT_PERMISSIONS};
use crate::bitstream::bitwriter::BitWriter;
use crate::error::{HuffError, Result};
use crate::huffman_coding::huffman::{build_codes, build_tree};
use crate::huffman_coding::tree_codec::dump_tree;
use crate::tools::cli::HuffOpts;
use crate::tools::counter::CountingWriter;
use crate::tools::freq_count::histogram;
use crate::tools::report::{compress_report, report};

/// What an encode session produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    pub header: Header,
    /// Bytes of input, counted on the first pass.
    pub original_size: u64,
    /// Bytes written: header, tree and payload.
    pub compressed_size: u64,
}

/// Compress everything in `reader` to `writer`.
///
/// The input is read twice: once to count the bytes, then (after rewinding) once to emit their
/// codes. `permissions` goes into the header unchanged.
pub fn encode<R: Read + Seek, W: Write>(
    reader: &mut R,
    writer: W,
    permissions: u16,
) -> Result<EncodeSummary> {
    // First pass: histogram
    let start = reader.stream_position()?;
    let hist = histogram(reader)?;
    info!(
        "Read {} bytes with {} distinct symbols.",
        hist.total,
        hist.symbols()
    );

    let tree = build_tree(&hist.counts)?;
    let codes = build_codes(&tree)?;
    let tree_bytes = dump_tree(&tree);
    debug!("Serialized tree is {} bytes.", tree_bytes.len());

    let header = Header::new(permissions, tree_bytes.len() as u16, hist.total);
    let mut out = CountingWriter::new(writer);
    header.write_to(&mut out)?;
    out.write_all(&tree_bytes)?;

    // Second pass: one code per input byte
    reader.seek(SeekFrom::Start(start))?;
    let mut bw = BitWriter::new(&mut out);
    let mut buf = vec![0_u8; 64 * 1024];
    let mut emitted = 0_u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..n] {
            bw.write_code(&codes[byte as usize])?;
        }
        emitted += n as u64;
    }
    debug!("Payload ends at {} before the flush.", bw.loc());
    bw.flush()?;
    info!("Wrote {} payload bytes.", bw.bytes_written());

    if emitted != hist.total {
        error!(
            "Input changed while compressing: counted {} bytes, then read {}.",
            hist.total, emitted
        );
        return Err(HuffError::Io(io::Error::new(
            ErrorKind::InvalidData,
            "input changed between passes",
        )));
    }

    Ok(EncodeSummary {
        header,
        original_size: hist.total,
        compressed_size: out.count(),
    })
}

/// Compress a slice in memory.
pub fn compress_bytes(data: &[u8], permissions: u16) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(&mut Cursor::new(data), &mut out, permissions)?;
    Ok(out)
}

/// Compress the input named in opts (or stdin) to the output named in opts (or stdout).
pub fn compress(opts: &HuffOpts) -> Result<EncodeSummary> {
    let summary = match &opts.input {
        Some(name) => {
            let fin = File::open(name).map_err(|e| {
                error!("Couldn't open {}: {}", name, e);
                e
            })?;
            let permissions = file_permissions(&fin.metadata()?);
            encode_to_output(&mut BufReader::new(fin), opts, permissions)?
        }
        None => {
            // Stdin cannot be rewound, so hold it in memory for the second pass
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            debug!("Staged {} bytes from stdin.", data.len());
            encode_to_output(&mut Cursor::new(data), opts, DEFAULT_PERMISSIONS)?
        }
    };

    if opts.stats {
        report(compress_report(
            summary.original_size,
            summary.compressed_size,
        ));
    }
    Ok(summary)
}

fn encode_to_output<R: Read + Seek>(
    reader: &mut R,
    opts: &HuffOpts,
    permissions: u16,
) -> Result<EncodeSummary> {
    match &opts.output {
        Some(name) => {
            let fout = File::create(name).map_err(|e| {
                error!("Couldn't create {}: {}", name, e);
                e
            })?;
            apply_permissions(&fout, permissions)?;
            let result = encode(reader, BufWriter::new(fout), permissions);
            if result.is_err() {
                warn!("Removing partial output {}.", name);
                if let Err(e) = fs::remove_file(name) {
                    warn!("Couldn't remove {}: {}", name, e);
                }
            }
            result
        }
        None => encode(reader, BufWriter::new(io::stdout().lock()), permissions),
    }
}
