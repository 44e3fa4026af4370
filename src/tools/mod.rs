//! The tools module provides the glue around the codec.
//!
//! The tools are:
//! - cli: Command line interface.
//! - counter: Byte counting wrappers for readers and writers, used for the statistics.
//! - freq_count: Byte frequency count (the histogram the tree is built from).
//! - report: The statistics report.
//!
pub mod cli;
pub mod counter;
pub mod freq_count;
pub mod report;
