use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{debug, info};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// The log level this verbosity lets through.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Compress or decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define all user settable options to control program behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffOpts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Name of file to read for input, standard input if None
    pub input: Option<String>,
    /// Name of file to write, standard output if None
    pub output: Option<String>,
    /// Print size statistics when done
    pub stats: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Zip,
            input: None,
            output: None,
            stats: false,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman file compressor",
    long_about = "
    Compresses a file with a Huffman code built for its byte distribution. The code tree is
    stored ahead of the compressed data, so decompression needs nothing but the file itself.
    The permissions of the original file are restored on decompression.

    With no input or output file, reads standard input and writes standard output."
)]
pub struct Args {
    /// Compress the input (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Input file to read
    #[clap(short = 'i', long = "input", value_name = "FILE")]
    input: Option<String>,

    /// Output file to write
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Print compression statistics to stderr
    #[clap(short = 's', long = "stats")]
    stats: bool,

    /// Sets verbosity. -v shows warnings, -vvvv is chatty
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log messages
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        let mut opts = HuffOpts::new();
        if args.decompress {
            opts.op_mode = Mode::Unzip;
        }
        opts.input = args.input;
        opts.output = args.output;
        opts.stats = args.stats;
        opts.verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Errors,
            (false, 1) => Verbosity::Warnings,
            (false, 2) => Verbosity::Info,
            (false, 3) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        opts
    }
}

/// Parse options from an explicit argument list. The first item is the program name.
pub fn parse_opts<I, T>(args: I) -> Result<HuffOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args).map(HuffOpts::from)
}

/// Read the command line into HuffOpts and set the log level to match. Exits on bad arguments.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.input {
        Some(s) => debug!("Getting input from the file {}", s),
        None => debug!("Getting input from stdin"),
    }
    match &opts.output {
        Some(s) => debug!("Sending output to the file {}", s),
        None => debug!("Sending output to stdout"),
    }
    opts
}

#[cfg(test)]
mod test {
    use super::{parse_opts, Mode, Verbosity};

    #[test]
    fn defaults_test() {
        let opts = parse_opts(["huff"]).unwrap();
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.input, None);
        assert_eq!(opts.output, None);
        assert!(!opts.stats);
        assert_eq!(opts.verbose, Verbosity::Errors);
    }

    #[test]
    fn decompress_files_test() {
        let opts = parse_opts(["huff", "-d", "-i", "in.huf", "-o", "out.txt", "-s"]).unwrap();
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.input.as_deref(), Some("in.huf"));
        assert_eq!(opts.output.as_deref(), Some("out.txt"));
        assert!(opts.stats);
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(parse_opts(["huff", "-vv"]).unwrap().verbose, Verbosity::Info);
        assert_eq!(parse_opts(["huff", "-vvvvvv"]).unwrap().verbose, Verbosity::Trace);
        assert_eq!(parse_opts(["huff", "-q"]).unwrap().verbose, Verbosity::Quiet);
        assert_eq!(Verbosity::Quiet.level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(parse_opts(["huff", "-z", "-d"]).is_err());
        assert!(parse_opts(["huff", "--bogus"]).is_err());
    }
}
