//! Per-console extractors.
//!
//! An extractor decides which bytes of a ROM are significant and how much
//! synthetic padding follows them, then pushes exactly that byte sequence into
//! a [`RomHasher`]. Dispatch mirrors how a frontend picks a console: one
//! boxed [`Extractor`] per [`crate::RomType`].
//!
//! | Extractor | Bytes hashed |
//! |-----------|--------------|
//! | [`GenericExtractor`] | the whole file |
//! | [`PaddedExtractor::genesis`] | the whole file, zero padded to 6 MiB |
//! | [`PaddedExtractor::snes`] | the whole file, zero padded to 8 MiB |
//! | [`NesExtractor`] | PRG banks, `0xFF` padded to a power-of-two bank count |

use std::fmt::Debug;
use std::io::{Read, Seek};

use crate::{Result, digest::RomHasher};

pub mod generic;
pub mod nes;
pub mod padded;

pub use generic::GenericExtractor;
pub use nes::NesExtractor;
pub use padded::{GENESIS_TARGET_SIZE, PaddedExtractor, SNES_TARGET_SIZE};

/// A seekable byte source a ROM can be read from.
pub trait RomSource: Read + Seek {}

impl<T: Read + Seek> RomSource for T {}

pub trait Extractor: Debug {
    /// Short lowercase name, identical to the matching ROM type name.
    fn name(&self) -> &'static str;

    /// Feed the normalized contents of `rom` into `hasher`.
    ///
    /// `rom` is expected to be positioned at the start of the file.
    fn extract(&self, rom: &mut dyn RomSource, hasher: &mut RomHasher) -> Result<()>;
}
