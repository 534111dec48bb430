//! Streaming MD5 accumulator and the 128-bit digest it produces.
//!
//! Achievement hash registries key ROMs by MD5, so the accumulator is fixed to
//! that algorithm. Bytes are hashed in exactly the order they are supplied and
//! chunk boundaries never affect the result.

use std::fmt;
use std::str::FromStr;

use md5::{Digest as _, Md5};

/// Width of a [`Digest`] in bytes.
pub const DIGEST_LEN: usize = 16;

/// Running hash state for a single ROM.
///
/// [`RomHasher::finalize`] takes the hasher by value, so a finalized state can
/// neither be updated nor finalized again.
#[derive(Debug, Clone, Default)]
pub struct RomHasher {
    inner: Md5,
    bytes_hashed: u64,
}

impl RomHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `bytes` into the running digest.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
        self.bytes_hashed += bytes.len() as u64;
    }

    /// Total number of bytes supplied so far, padding included.
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes_hashed
    }

    pub fn finalize(self) -> Digest {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&self.inner.finalize());
        Digest(bytes)
    }
}

/// A finished 128-bit ROM checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal rendering (32 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}
