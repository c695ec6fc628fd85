use byteorder::{BigEndian, ByteOrder};

use crate::constants::section_bits::{
    LENGTH_RESERVED, MAX_SECTION_LENGTH, PRIVATE, SECTION_SYNTAX, VERSION_MASK, VERSION_RESERVED,
};
use crate::constants::SECTION_CRC32_SIZE;
use crate::section::crc::crc32_mpeg2;
use crate::section::types::{Section, SectionError, SectionHeader};

/// Encode a section into its canonical wire format.
///
/// Layout (big-endian):
///
/// ```text
/// [ table_id (1) ]
/// [ syntax=1 | private=1 | reserved=11 | section_length (12 bits) ]
/// [ table_id_extension (2) ]
/// [ reserved=11 | version (5 bits) | current_next (1 bit) ]
/// [ section_number (1) ]
/// [ last_section_number (1) ]
/// [ payload (N) ]
/// [ CRC32 (4) ]
/// ```
pub fn encode_section(section: &Section) -> Result<Vec<u8>, SectionError> {
    section.validate()?;

    let h = &section.header;
    let total = SectionHeader::LEN + section.payload.len() + SECTION_CRC32_SIZE;
    // section_length counts everything after its own field
    let section_length = total - 3;
    debug_assert!(section_length <= MAX_SECTION_LENGTH);

    let mut head = [0u8; SectionHeader::LEN];
    head[0] = h.table_id;
    BigEndian::write_u16(&mut head[1..3], section_length as u16);
    head[1] |= SECTION_SYNTAX | PRIVATE | LENGTH_RESERVED;
    BigEndian::write_u16(&mut head[3..5], h.table_id_extension);
    head[5] = VERSION_RESERVED | ((h.version & VERSION_MASK) << 1) | u8::from(h.is_current);
    head[6] = h.section_number;
    head[7] = h.last_section_number;

    let mut out = Vec::with_capacity(total);

    // --- Header ---
    out.extend_from_slice(&head);

    // --- Body ---
    out.extend_from_slice(&section.payload);

    // --- CRC ---
    let crc = crc32_mpeg2(&out);
    out.extend_from_slice(&crc.to_be_bytes());

    debug_assert_eq!(out.len(), total);
    Ok(out)
}
