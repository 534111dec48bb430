use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::format::{Extractor, GenericExtractor, NesExtractor, PaddedExtractor};

/// Console family whose normalization rules apply before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RomType {
    /// Hash the file byte for byte.
    #[default]
    Generic,
    /// iNES dump; only the PRG banks are hashed.
    Nes,
    /// Super Nintendo; zero padded to 8 MiB.
    Snes,
    /// Genesis / Mega Drive; zero padded to 6 MiB.
    Genesis,
}

impl RomType {
    pub const ALL: [RomType; 4] = [Self::Generic, Self::Nes, Self::Snes, Self::Genesis];

    pub fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Nes => "nes",
            Self::Snes => "snes",
            Self::Genesis => "genesis",
        }
    }

    /// Map a frontend console name to the ROM type its dumps are hashed as.
    ///
    /// Consoles without dedicated rules fall back to [`RomType::Generic`].
    pub fn from_console_name(console: &str) -> Self {
        match console {
            "MegaDrive" | "Genesis" => Self::Genesis,
            "NES" => Self::Nes,
            "SNES" => Self::Snes,
            _ => Self::Generic,
        }
    }

    pub fn extractor(self) -> Box<dyn Extractor> {
        match self {
            Self::Generic => Box::new(GenericExtractor),
            Self::Nes => Box::new(NesExtractor),
            Self::Snes => Box::new(PaddedExtractor::snes()),
            Self::Genesis => Box::new(PaddedExtractor::genesis()),
        }
    }
}

impl fmt::Display for RomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RomType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| Error::UnsupportedRomType(s.to_owned()))
    }
}
