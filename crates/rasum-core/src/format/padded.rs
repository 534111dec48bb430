//! Fixed-capacity cartridges whose dumps are zero padded to a target size.

use tracing::debug;

use super::{Extractor, RomSource};
use crate::{
    Result,
    digest::RomHasher,
    stream::{pad_to, stream_all},
};

/// Genesis / Mega Drive normalized size (6 MiB).
pub const GENESIS_TARGET_SIZE: u64 = 6 * 1024 * 1024;
/// Super Nintendo normalized size (8 MiB).
pub const SNES_TARGET_SIZE: u64 = 8 * 1024 * 1024;

/// Streams the whole file, then zero pads up to `target` bytes.
///
/// Files already at or beyond the target are hashed as-is, never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddedExtractor {
    name: &'static str,
    target: u64,
}

impl PaddedExtractor {
    pub const fn genesis() -> Self {
        Self {
            name: "genesis",
            target: GENESIS_TARGET_SIZE,
        }
    }

    pub const fn snes() -> Self {
        Self {
            name: "snes",
            target: SNES_TARGET_SIZE,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

impl Extractor for PaddedExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, rom: &mut dyn RomSource, hasher: &mut RomHasher) -> Result<()> {
        let size = stream_all(rom, hasher)?;
        let padding = self.target.saturating_sub(size);
        debug!(console = self.name, size, padding, "padding ROM to target size");
        pad_to(hasher, padding);
        Ok(())
    }
}
