use std::env;
use std::io::{self, Write};

use bf_repl::{logging, repl, Config};
use clap::Parser;

/// Interactive Brainfuck interpreter with a persistent tape.
///
/// Configuration is read from $XDG_CONFIG_HOME/bf.toml (or BF_CONFIG) and
/// the BF_TAPE_SIZE / BF_REPL_MODE environment variables.
#[derive(Parser, Debug)]
#[command(name = "bf", version)]
struct Cli {}

fn main() {
    // We still pull the program name for error message consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));
    let _cli = Cli::parse();

    logging::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{program}: {e}");
            let _ = io::stderr().flush();
            std::process::exit(2);
        }
    };

    std::process::exit(repl::run(&program, &config));
}
