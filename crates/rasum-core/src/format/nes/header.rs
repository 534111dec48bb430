//! The 16-byte iNES header.
//!
//! ```text
//! [0..4]   magic "NES\x1A"
//! [4]      PRG ROM size in 16 KiB pages
//! [5]      CHR ROM size in 8 KiB pages
//! [6]      flags 6: mirroring, battery, trainer, four-screen, mapper low nibble
//! [7]      flags 7: Vs./PlayChoice, NES 2.0 marker, mapper high nibble
//! [8..16]  reserved / extension bytes
//! ```
//!
//! Only the fields that influence hashing get accessors; NES 2.0 extensions in
//! the reserved bytes are carried through untouched.

use bitflags::bitflags;

use crate::error::Error;

pub const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;

/// Size of the optional trainer block that may follow the header.
pub const TRAINER_SIZE: usize = 512;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM     = 0b0000_0001;
        const PLAYCHOICE_10    = 0b0000_0010;
        const NES2_DETECTION   = 0b0000_1100;
        const MAPPER_HIGH_MASK = 0b1111_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NesHeader {
    /// Raw PRG ROM page count (16 KiB units). 0 is common for 4 MiB dumps.
    pub prg_pages: u8,
    /// Raw CHR ROM page count (8 KiB units).
    pub chr_pages: u8,
    pub flags6: Flags6,
    pub flags7: Flags7,
    pub reserved: [u8; 8],
}

impl NesHeader {
    /// Decode a header from the first [`NES_HEADER_LEN`] bytes of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; NES_HEADER_LEN] = bytes
            .get(..NES_HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(Error::TooShort {
                actual: bytes.len(),
            })?;

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[8..16]);

        Ok(Self {
            prg_pages: bytes[4],
            chr_pages: bytes[5],
            flags6: Flags6::from_bits_retain(bytes[6]),
            flags7: Flags7::from_bits_retain(bytes[7]),
            reserved,
        })
    }

    /// iNES mapper number: low nibble from flags 6, high nibble from flags 7.
    pub fn mapper(&self) -> u8 {
        (self.flags6.bits() >> 4) | (self.flags7.bits() & 0xF0)
    }

    /// Whether the 512-byte trainer block is advertised.
    pub fn has_trainer(&self) -> bool {
        self.flags6.contains(Flags6::TRAINER)
    }
}
