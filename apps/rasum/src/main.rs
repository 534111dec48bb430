mod args;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind as ClapErrorKind};
use rasum_core::{Digest, RomType, hash_file};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use crate::args::Args;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version go to stdout; usage errors to stderr.
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(err) = init_tracing(args.log_level) {
        eprintln!("rasum: {err}");
    }

    match run(&args) {
        Ok(digest) => {
            println!("{digest}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("rasum: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(args: &Args) -> Result<Digest> {
    let rom_type: RomType = args.rom_type.parse()?;
    let rom = args
        .rom
        .as_deref()
        .context("ROM file path not specified")?;

    debug!(rom = %rom.display(), %rom_type, "hashing");
    let digest = hash_file(rom, rom_type)?;
    Ok(digest)
}
