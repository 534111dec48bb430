//! Sequential readers and zero padding that feed a [`RomHasher`].

use std::io::{ErrorKind, Read};

use crate::{Result, digest::RomHasher};

/// Read granularity for whole-file streaming and zero padding.
pub const CHUNK_SIZE: usize = 4096;

/// Hash every remaining byte of `reader` and return how many were consumed.
///
/// An empty source is valid and contributes nothing.
pub fn stream_all<R: Read + ?Sized>(reader: &mut R, hasher: &mut RomHasher) -> Result<u64> {
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        hasher.update(&buffer[..read]);
        total += read as u64;
    }

    Ok(total)
}

/// Feed `remaining` zero bytes into `hasher`.
///
/// Callers compute `remaining` with saturating subtraction, so a source that
/// already reached its target size pads nothing.
pub fn pad_to(hasher: &mut RomHasher, remaining: u64) {
    const ZEROES: [u8; CHUNK_SIZE] = [0; CHUNK_SIZE];

    let mut left = remaining;
    while left > 0 {
        let len = left.min(CHUNK_SIZE as u64) as usize;
        hasher.update(&ZEROES[..len]);
        left -= len as u64;
    }
}

/// Fill as much of `buf` as `reader` can supply, returning the byte count.
///
/// Unlike [`Read::read_exact`], a short source is not an error; the caller
/// decides how many bytes it needs.
pub fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(filled)
}
