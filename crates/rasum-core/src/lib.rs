//! Console-aware ROM checksums.
//!
//! Two dumps of the same cartridge can differ in header presence, trailing
//! padding or unused banks. `rasum-core` normalizes a ROM the way achievement
//! hash registries expect and returns the MD5 of the result.
//!
//! # Quick overview
//! - Pick a [`RomType`] (parse it from `"nes"`, `"snes"`, `"genesis"` or
//!   `"generic"`, or map a frontend console name with
//!   [`RomType::from_console_name`]).
//! - Call [`hash_file`] with a path, or [`hash_rom`] with any seekable reader.
//! - Render the returned [`Digest`] with `to_string()` for the 32-character
//!   lowercase form.

use std::{fs::File, io::BufReader, path::Path};

use tracing::debug;

pub mod digest;
pub mod error;
pub mod format;
pub mod rom_type;
pub mod stream;

pub use digest::{Digest, RomHasher};
pub use error::{Error, ErrorKind, Result};
pub use format::{Extractor, RomSource};
pub use rom_type::RomType;

/// Normalize and hash a ROM read from `rom`.
///
/// `rom` must be positioned at the start of the image.
pub fn hash_rom(rom: &mut dyn RomSource, rom_type: RomType) -> Result<Digest> {
    let extractor = rom_type.extractor();
    debug!(extractor = extractor.name(), "hashing ROM");

    let mut hasher = RomHasher::new();
    extractor.extract(rom, &mut hasher)?;
    debug!(bytes = hasher.bytes_hashed(), "finalizing digest");
    Ok(hasher.finalize())
}

/// Open `path` and hash it as `rom_type`.
pub fn hash_file<P>(path: P, rom_type: RomType) -> Result<Digest>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    hash_rom(&mut BufReader::new(file), rom_type)
}
