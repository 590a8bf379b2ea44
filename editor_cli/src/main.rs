//! Ember - command-driven driver for the text engine.
//!
//! Usage: ember [FILE] [--config CONFIG.json] [--single-line]
//!
//! Commands are read from stdin, one per line. Each command prints the
//! cursor position afterwards.

mod command;
mod error;
mod session;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use ember_core::{BufferKind, EngineConfig};

use crate::command::Command;
use crate::error::CliError;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "ember", version, about = "Drive the Ember text engine from the terminal")]
struct Args {
    /// File to load into the buffer.
    file: Option<PathBuf>,
    /// JSON file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use a single-line buffer without a line index.
    #[arg(long)]
    single_line: bool,
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Ember");

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Ember exited");
}

fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_str(&read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let kind = if args.single_line {
        BufferKind::SingleLine
    } else {
        BufferKind::Text
    };

    let mut session = Session::new(config, kind);
    if let Some(path) = &args.file {
        log::info!("Opening file: {}", path.display());
        let content = fs::read(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        session.load(path, content);
    }

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if !session.execute(command, &mut out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("{}", e),
        }
        out.flush()?;
    }
    Ok(())
}

fn read_to_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
