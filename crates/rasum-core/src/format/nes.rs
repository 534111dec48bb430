//! iNES PRG extraction.
//!
//! Only PRG ROM contributes to an NES hash. The bank count advertised by the
//! header is rounded up to a power of two (a handful of mappers excepted) and
//! any part of that extent the file does not supply hashes as
//! [`PRG_FILL_BYTE`].

use std::io::{Seek, SeekFrom};

use tracing::debug;

use self::header::{NES_HEADER_LEN, NesHeader};
use super::{Extractor, RomSource};
use crate::{Result, digest::RomHasher, error::Error, stream::read_up_to};

pub mod header;

/// Size of one PRG page / bank.
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Value of PRG bytes the file did not supply.
pub const PRG_FILL_BYTE: u8 = 0xFF;

/// Logical page count used when the header stores 0.
pub const DEFAULT_PRG_PAGES: u32 = 256;

/// Mappers whose PRG size is not a power of two; their raw page count is read.
pub const NON_POWER_OF_TWO_MAPPERS: [u8; 3] = [53, 198, 228];

/// Round `n` up to the next power of two. Powers of two map to themselves and
/// 0 wraps to 0.
pub fn next_power_of_two(n: u32) -> u32 {
    let mut n = n.wrapping_sub(1);
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    n.wrapping_add(1)
}

/// Logical PRG page count for a raw header value.
pub fn logical_prg_pages(raw_pages: u8) -> u32 {
    if raw_pages != 0 {
        next_power_of_two(raw_pages as u32)
    } else {
        DEFAULT_PRG_PAGES
    }
}

pub fn uses_raw_page_count(mapper: u8) -> bool {
    NON_POWER_OF_TWO_MAPPERS.contains(&mapper)
}

/// What the extractor will read and hash for a given header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NesLayout {
    pub mapper: u8,
    pub raw_pages: u8,
    /// Pages covered by the hash.
    pub rounded_pages: u32,
    /// Banks requested from the file.
    pub banks_to_read: u32,
    pub trainer: bool,
}

impl NesLayout {
    pub fn from_header(header: &NesHeader) -> Self {
        let mapper = header.mapper();
        let rounded_pages = logical_prg_pages(header.prg_pages);
        let banks_to_read = if uses_raw_page_count(mapper) {
            header.prg_pages as u32
        } else {
            rounded_pages
        };

        Self {
            mapper,
            raw_pages: header.prg_pages,
            rounded_pages,
            banks_to_read,
            trainer: header.has_trainer(),
        }
    }

    /// Number of bytes fed to the hasher.
    pub fn hashed_len(&self) -> usize {
        self.rounded_pages as usize * PRG_BANK_SIZE
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NesExtractor;

impl Extractor for NesExtractor {
    fn name(&self) -> &'static str {
        "nes"
    }

    fn extract(&self, rom: &mut dyn RomSource, hasher: &mut RomHasher) -> Result<()> {
        let mut head = [0u8; NES_HEADER_LEN];
        let read = read_up_to(rom, &mut head)?;
        if read < NES_HEADER_LEN {
            return Err(Error::TooShort { actual: read });
        }

        let header = NesHeader::parse(&head)?;
        let layout = NesLayout::from_header(&header);
        debug!(
            mapper = layout.mapper,
            raw_pages = layout.raw_pages,
            rounded_pages = layout.rounded_pages,
            banks_to_read = layout.banks_to_read,
            "parsed iNES header"
        );

        // Hash registries were built with a reader that seeks to the end of
        // the header here, not past the trainer, so trainer bytes are hashed
        // as the start of PRG.
        if layout.trainer {
            rom.seek(SeekFrom::Start(NES_HEADER_LEN as u64))?;
            debug!("trainer present, reading PRG from end of header");
        }

        let mut prg = alloc_prg(layout.hashed_len())?;
        let wanted = layout.banks_to_read as usize * PRG_BANK_SIZE;
        let read = read_up_to(rom, &mut prg[..wanted])?;
        if read / PRG_BANK_SIZE == 0 {
            return Err(Error::ReadFailed);
        }
        debug!(read, hashed = prg.len(), "read PRG banks");

        hasher.update(&prg);
        Ok(())
    }
}

fn alloc_prg(len: usize) -> Result<Vec<u8>> {
    let mut prg = Vec::new();
    prg.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { bytes: len })?;
    prg.resize(len, PRG_FILL_BYTE);
    Ok(prg)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::header::{NES_MAGIC, TRAINER_SIZE};
    use super::*;

    fn base_header(prg_pages: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut header = vec![0u8; NES_HEADER_LEN];
        header[..4].copy_from_slice(NES_MAGIC);
        header[4] = prg_pages;
        header[6] = flags6;
        header[7] = flags7;
        header
    }

    fn extract(rom: &[u8]) -> Result<RomHasher> {
        let mut hasher = RomHasher::new();
        NesExtractor.extract(&mut Cursor::new(rom), &mut hasher)?;
        Ok(hasher)
    }

    fn md5_of(bytes: &[u8]) -> crate::Digest {
        let mut hasher = RomHasher::new();
        hasher.update(bytes);
        hasher.finalize()
    }

    #[test]
    fn rounds_to_power_of_two() {
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(255), 256);
        assert_eq!(next_power_of_two(256), 256);
        assert_eq!(next_power_of_two(257), 512);
        assert_eq!(next_power_of_two(0), 0);
        assert_eq!(next_power_of_two(1 << 31), 1 << 31);
    }

    #[test]
    fn zero_pages_defaults_to_256() {
        assert_eq!(logical_prg_pages(0), DEFAULT_PRG_PAGES);
        assert_eq!(logical_prg_pages(5), 8);
    }

    #[test]
    fn layout_for_exception_mapper_reads_raw_pages() {
        // Mapper 228: low nibble 4, high nibble E.
        let header = NesHeader::parse(&base_header(3, 0x40, 0xE0)).expect("header");
        let layout = NesLayout::from_header(&header);

        assert_eq!(layout.mapper, 228);
        assert_eq!(layout.rounded_pages, 4);
        assert_eq!(layout.banks_to_read, 3);
        assert_eq!(layout.hashed_len(), 4 * PRG_BANK_SIZE);
    }

    #[test]
    fn hashes_single_bank() {
        let mut rom = base_header(1, 0, 0);
        rom.extend(vec![0xAA; PRG_BANK_SIZE]);
        rom.extend(vec![0x55; 8 * 1024]); // CHR is ignored

        let hasher = extract(&rom).expect("extract");

        assert_eq!(hasher.bytes_hashed(), PRG_BANK_SIZE as u64);
        assert_eq!(
            hasher.finalize().to_string(),
            "84d7806947ae3e96682f4fa8e277e6d1"
        );
    }

    #[test]
    fn fills_missing_banks_with_ff() {
        let mut rom = base_header(3, 0, 0);
        rom.extend(vec![0x11; 3 * PRG_BANK_SIZE]);

        let digest = extract(&rom).expect("extract").finalize();

        assert_eq!(digest.to_string(), "b18bdafe0b0d9397edea1f52133b7b99");
    }

    #[test]
    fn rounded_read_consumes_bytes_past_raw_pages() {
        // Mapper 0 rounds 3 pages to 4 and reads the 4th bank from the file.
        let mut rom = base_header(3, 0, 0);
        rom.extend(vec![0x11; 3 * PRG_BANK_SIZE]);
        rom.extend(vec![0x22; PRG_BANK_SIZE]);

        let digest = extract(&rom).expect("extract").finalize();

        assert_eq!(digest, md5_of(&rom[NES_HEADER_LEN..]));
    }

    #[test]
    fn exception_mapper_stops_at_raw_pages() {
        // Mapper 53: low nibble 5, high nibble 3.
        let mut rom = base_header(3, 0x50, 0x30);
        rom.extend(vec![0x11; 3 * PRG_BANK_SIZE]);
        rom.extend(vec![0x22; PRG_BANK_SIZE]);

        let digest = extract(&rom).expect("extract").finalize();

        let expected = [
            vec![0x11; 3 * PRG_BANK_SIZE],
            vec![PRG_FILL_BYTE; PRG_BANK_SIZE],
        ]
        .concat();
        assert_eq!(digest, md5_of(&expected));
    }

    #[test]
    fn partial_bank_is_kept_after_a_full_one() {
        let mut rom = base_header(2, 0, 0);
        rom.extend(vec![0x33; PRG_BANK_SIZE + 100]);

        let digest = extract(&rom).expect("extract").finalize();

        let expected = [
            vec![0x33; PRG_BANK_SIZE + 100],
            vec![PRG_FILL_BYTE; PRG_BANK_SIZE - 100],
        ]
        .concat();
        assert_eq!(digest, md5_of(&expected));
    }

    #[test]
    fn trainer_bytes_are_hashed_as_prg() {
        // The trainer is not skipped: PRG starts right after the header.
        let mut rom = base_header(1, 0b0000_0100, 0);
        rom.extend(vec![0xFE; TRAINER_SIZE]);
        rom.extend(vec![0xAA; PRG_BANK_SIZE]);

        let digest = extract(&rom).expect("extract").finalize();

        let expected = [
            vec![0xFE; TRAINER_SIZE],
            vec![0xAA; PRG_BANK_SIZE - TRAINER_SIZE],
        ]
        .concat();
        assert_eq!(digest, md5_of(&expected));
    }

    #[test]
    fn zero_page_header_hashes_4_mib() {
        let mut rom = base_header(0, 0, 0);
        rom.extend(vec![0x44; PRG_BANK_SIZE]);

        let hasher = extract(&rom).expect("extract");

        assert_eq!(
            hasher.bytes_hashed(),
            DEFAULT_PRG_PAGES as u64 * PRG_BANK_SIZE as u64
        );
    }

    #[test]
    fn errors_when_header_truncated() {
        let err = extract(b"NES\x1A\x01\x00").unwrap_err();
        assert!(matches!(err, Error::TooShort { actual: 6 }));
    }

    #[test]
    fn errors_on_bad_magic() {
        let mut rom = b"NES\x00".to_vec();
        rom.extend(vec![0u8; 12 + PRG_BANK_SIZE]);

        let err = extract(&rom).unwrap_err();
        assert!(matches!(err, Error::InvalidMagic));
    }

    #[test]
    fn errors_when_no_full_bank_is_present() {
        let mut rom = base_header(1, 0, 0);
        rom.extend(vec![0xAA; 1024]); // insufficient PRG data

        let err = extract(&rom).unwrap_err();
        assert!(matches!(err, Error::ReadFailed));
    }

    #[test]
    fn exception_mapper_with_zero_pages_reads_nothing() {
        // Mapper 198 with 0 raw pages requests no banks at all.
        let mut rom = base_header(0, 0x60, 0xC0);
        rom.extend(vec![0xAA; PRG_BANK_SIZE]);

        let err = extract(&rom).unwrap_err();
        assert!(matches!(err, Error::ReadFailed));
    }
}
