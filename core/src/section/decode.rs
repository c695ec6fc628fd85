use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::constants::section_bits::{SECTION_SYNTAX, VERSION_MASK};
use crate::constants::{SECTION_CRC32_SIZE, SHORT_SECTION_HEADER_SIZE};
use crate::section::crc::crc32_mpeg2;
use crate::section::types::{Section, SectionError, SectionHeader};

/// Parse the fixed long section header. Does not look at payload or CRC.
#[inline]
pub fn parse_section_header(wire: &[u8]) -> Result<SectionHeader, SectionError> {
    if wire.len() < SectionHeader::LEN {
        return Err(SectionError::Truncated { have: wire.len(), need: SectionHeader::LEN });
    }
    if wire[1] & SECTION_SYNTAX == 0 {
        return Err(SectionError::NotLongSection);
    }

    Ok(SectionHeader {
        table_id: wire[0],
        table_id_extension: BigEndian::read_u16(&wire[3..5]),
        version: (wire[5] >> 1) & VERSION_MASK,
        is_current: wire[5] & 0x01 != 0,
        section_number: wire[6],
        last_section_number: wire[7],
    })
}

/// Decode exactly one section from `wire`.
///
/// Strict: the buffer must hold the whole section and nothing else, and the
/// CRC32 must match.
pub fn decode_section(wire: &[u8]) -> Result<Section, SectionError> {
    let header = parse_section_header(wire)?;

    let section_length = (BigEndian::read_u16(&wire[1..3]) & 0x0FFF) as usize;
    let expected_len = SHORT_SECTION_HEADER_SIZE + section_length;
    if expected_len < SectionHeader::LEN + SECTION_CRC32_SIZE {
        return Err(SectionError::LengthMismatch {
            expected: SectionHeader::LEN + SECTION_CRC32_SIZE,
            actual: expected_len,
        });
    }
    if wire.len() < expected_len {
        return Err(SectionError::Truncated { have: wire.len(), need: expected_len });
    }
    if wire.len() != expected_len {
        return Err(SectionError::LengthMismatch { expected: expected_len, actual: wire.len() });
    }

    let crc_offset = expected_len - SECTION_CRC32_SIZE;
    let have = BigEndian::read_u32(&wire[crc_offset..]);
    let need = crc32_mpeg2(&wire[..crc_offset]);
    if have != need {
        return Err(SectionError::Crc32Mismatch { have, need });
    }

    let payload = Bytes::copy_from_slice(&wire[SectionHeader::LEN..crc_offset]);
    Section::new(header, payload)
}
