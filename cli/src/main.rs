mod args;
mod cli;

use args::Args;
use std::{io, process};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    init_logger(args.verbose);
    match cli::run(&args) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
