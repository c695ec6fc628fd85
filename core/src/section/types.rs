use bytes::Bytes;

use crate::constants::{MAX_PSI_LONG_SECTION_PAYLOAD_SIZE, section_bits::VERSION_MASK};

/// Long section header fields shared by every section of one table.
///
/// `section_number` / `last_section_number` locate the section in its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub table_id: u8,
    pub table_id_extension: u16,
    /// 5-bit version number.
    pub version: u8,
    pub is_current: bool,
    pub section_number: u8,
    pub last_section_number: u8,
}

impl SectionHeader {
    /// On the wire: table_id, flags/length, tid_ext, version/current,
    /// section_number, last_section_number.
    pub const LEN: usize = 1 // table_id
        + 2                  // syntax/private/reserved + section_length
        + 2                  // table_id_extension
        + 1                  // reserved + version + current_next
        + 1                  // section_number
        + 1;                 // last_section_number

    pub fn summary(&self) -> String {
        format!(
            "SectionHeader {{ table_id: 0x{:02X}, tid_ext: 0x{:04X}, version: {}, current: {}, section: {}/{} }}",
            self.table_id,
            self.table_id_extension,
            self.version,
            self.is_current,
            self.section_number,
            self.last_section_number,
        )
    }
}

/// One long section: header plus a payload of at most
/// [`MAX_PSI_LONG_SECTION_PAYLOAD_SIZE`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: SectionHeader,
    pub payload: Bytes,
}

impl Section {
    pub fn new(header: SectionHeader, payload: impl Into<Bytes>) -> Result<Self, SectionError> {
        let section = Self { header, payload: payload.into() };
        section.validate()?;
        Ok(section)
    }

    #[inline]
    pub fn table_id(&self) -> u8 {
        self.header.table_id
    }

    #[inline]
    pub fn payload_size(&self) -> usize {
        self.payload.len()
    }

    pub fn validate(&self) -> Result<(), SectionError> {
        if self.payload.len() > MAX_PSI_LONG_SECTION_PAYLOAD_SIZE {
            return Err(SectionError::PayloadTooLarge {
                have: self.payload.len(),
                max: MAX_PSI_LONG_SECTION_PAYLOAD_SIZE,
            });
        }
        if self.header.version & !VERSION_MASK != 0 {
            return Err(SectionError::InvalidVersion(self.header.version));
        }
        if self.header.section_number > self.header.last_section_number {
            return Err(SectionError::InvalidSectionNumber {
                number: self.header.section_number,
                last: self.header.last_section_number,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("truncated section: {have} < {need}")]
    Truncated { have: usize, need: usize },
    #[error("section length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("section_syntax_indicator not set")]
    NotLongSection,
    #[error("section payload too large: {have} > {max}")]
    PayloadTooLarge { have: usize, max: usize },
    #[error("invalid version: {0} (5 bits max)")]
    InvalidVersion(u8),
    #[error("section_number {number} > last_section_number {last}")]
    InvalidSectionNumber { number: u8, last: u8 },
    #[error("section CRC32 mismatch: got 0x{have:08X}, computed 0x{need:08X}")]
    Crc32Mismatch { have: u32, need: u32 },
}
