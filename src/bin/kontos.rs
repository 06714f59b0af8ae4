//! Kontos CLI binary.

use clap::Parser;
use kontos::cli::{args::*, commands::*};
use std::process;

fn main() {
    // Parse command line arguments using clap
    let args = KontosArgs::parse();

    // Map verbosity onto RUST_LOG before the logger is installed
    if std::env::var("RUST_LOG").is_err() {
        let level = match args.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        };
        unsafe {
            std::env::set_var("RUST_LOG", level);
        }
    }
    env_logger::init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
