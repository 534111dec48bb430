use tracing::debug;

use super::{Extractor, RomSource};
use crate::{Result, digest::RomHasher, stream::stream_all};

/// Identity transform: every byte of the file, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, rom: &mut dyn RomSource, hasher: &mut RomHasher) -> Result<()> {
        let size = stream_all(rom, hasher)?;
        debug!(size, "hashed generic ROM");
        Ok(())
    }
}
