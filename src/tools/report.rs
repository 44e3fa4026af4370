//! Size statistics printed after a run when the user asks for them.
//!
//! The report goes to stderr because stdout may be carrying the output data.

/// Percentage of the uncompressed size saved by compression. Zero for an empty original.
pub fn space_saving(compressed: u64, uncompressed: u64) -> f64 {
    if uncompressed == 0 {
        return 0.0;
    }
    100.0 * (1.0 - compressed as f64 / uncompressed as f64)
}

/// Report text after compressing.
pub fn compress_report(uncompressed: u64, compressed: u64) -> String {
    format!(
        "Uncompressed file size: {} bytes\nCompressed file size: {} bytes\nSpace saving: {:.2}%",
        uncompressed,
        compressed,
        space_saving(compressed, uncompressed)
    )
}

/// Report text after decompressing.
pub fn decompress_report(compressed: u64, decompressed: u64) -> String {
    format!(
        "Compressed file size: {} bytes\nDecompressed file size: {} bytes\nSpace saving: {:.2}%",
        compressed,
        decompressed,
        space_saving(compressed, decompressed)
    )
}

/// Print a report to stderr.
pub fn report<S: AsRef<str>>(msg: S) {
    eprintln!("{}", msg.as_ref())
}
