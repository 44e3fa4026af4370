//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huff::compression::compress::compress;
use huff::compression::decompress::decompress;
use huff::tools::cli::{huffopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. Logs go to stderr because stdout
    // may be carrying the output data.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("huff: couldn't start logging: {}", e);
    }

    let opts = huffopts_init();

    //----- Figure out what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Zip => compress(&opts).map(|s| s.compressed_size),
        Mode::Unzip => decompress(&opts).map(|s| s.decompressed_size),
    };

    match result {
        Ok(written) => info!("Done. Wrote {} bytes.", written),
        Err(e) => {
            let msg = e.user_message();
            error!("{}", msg);
            // With -q the logger is off, but a failure still has to be reported
            if log::max_level() == LevelFilter::Off {
                eprintln!("huff: {}", msg);
            }
            std::process::exit(1);
        }
    }
}
