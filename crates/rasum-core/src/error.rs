use std::path::PathBuf;

use thiserror::Error;

use crate::format::nes::header::NES_HEADER_LEN;

/// Result alias used throughout rasum-core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for I/O errors raised while streaming a ROM.
    #[error("i/o error while reading ROM: {0}")]
    Io(#[from] std::io::Error),

    /// The ROM file could not be opened.
    #[error("unable to open file: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer than 16 bytes were available for the NES header.
    #[error("could not read ROM: header expected {} bytes, got {actual}", NES_HEADER_LEN)]
    TooShort { actual: usize },

    /// Magic number ("NES<EOF>") is missing.
    #[error("not a valid NES ROM")]
    InvalidMagic,

    /// Not a single complete PRG bank could be read after the header.
    #[error("read failed for NES ROM")]
    ReadFailed,

    /// The PRG working buffer could not be allocated.
    #[error("allocation of {bytes} bytes failed for NES ROM")]
    Allocation { bytes: usize },

    /// The requested ROM type has no extractor.
    #[error("unsupported ROM type: \"{0}\"")]
    UnsupportedRomType(String),
}

/// Coarse classification of an [`Error`], used by front-ends to pick a
/// diagnostic or exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing caller input (unknown ROM type).
    Usage,
    /// The file could not be opened or a mandatory read came up short.
    Io,
    /// The ROM contents failed header validation.
    FormatValidation,
    /// A working buffer could not be allocated.
    Resource,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedRomType(_) => ErrorKind::Usage,
            Self::Io(_) | Self::Open { .. } | Self::TooShort { .. } | Self::ReadFailed => {
                ErrorKind::Io
            }
            Self::InvalidMagic => ErrorKind::FormatValidation,
            Self::Allocation { .. } => ErrorKind::Resource,
        }
    }
}
