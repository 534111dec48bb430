use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Calculate the RetroAchievements hash of a ROM
#[derive(Parser, Debug)]
#[command(name = "rasum", version, long_about = None)]
#[command(override_usage = "rasum [-t nes|snes|genesis|generic] ROM_PATH")]
#[command(
    after_help = "Use the -t option to specify the ROM type (nes, snes, genesis or generic).\nIf not specified, then \"generic\" is assumed."
)]
pub struct Args {
    /// ROM type: nes, snes, genesis or generic
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "generic")]
    pub rom_type: String,

    /// Log level written to stderr (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,

    /// Path to the ROM file
    #[arg(value_name = "ROM_PATH")]
    pub rom: Option<PathBuf>,
}
