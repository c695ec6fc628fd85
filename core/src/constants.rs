//! constants.rs
//! Bit-exact wire constants shared by the section, descriptor and SDT layers.
//!
//! All multi-byte integers on the wire are big-endian (MPEG-2 PSI convention).

/// Maximum size of a PSI section, header and CRC included.
pub const MAX_PSI_SECTION_SIZE: usize = 4096;
/// Short section header: table_id + flags/section_length.
pub const SHORT_SECTION_HEADER_SIZE: usize = 3;
/// Full long section header: short header + tid_ext, version/current, section numbers.
pub const LONG_SECTION_HEADER_SIZE: usize = 8;
/// Trailing CRC32 of a long section.
pub const SECTION_CRC32_SIZE: usize = 4;

/// Maximum payload of a long section (4084 bytes).
pub const MAX_PSI_LONG_SECTION_PAYLOAD_SIZE: usize =
    MAX_PSI_SECTION_SIZE - LONG_SECTION_HEADER_SIZE - SECTION_CRC32_SIZE;

/// Table ids of the two SDT variants.
pub mod table_ids {
    /// SDT describing the actual transport stream.
    pub const TID_SDT_ACT: u8 = 0x42;
    /// SDT describing another transport stream.
    pub const TID_SDT_OTH: u8 = 0x46;
}

/// Descriptor tags the codec knows by value.
pub mod descriptor_ids {
    pub const DID_DATA_ALIGN: u8 = 0x06;
    pub const DID_DEFERRED_ASSOC_TAGS: u8 = 0x15;
    pub const DID_SL: u8 = 0x1E;
    pub const DID_TRANSPORT_PROFILE: u8 = 0x37;
    pub const DID_NETWORK_NAME: u8 = 0x40;
    pub const DID_SERVICE_LIST: u8 = 0x41;
    pub const DID_SERVICE: u8 = 0x48;
    pub const DID_LINKAGE: u8 = 0x4A;
    pub const DID_SHORT_EVENT: u8 = 0x4D;
    pub const DID_EXTENDED_EVENT: u8 = 0x4E;
    pub const DID_CA_IDENTIFIER: u8 = 0x53;
    pub const DID_CONTENT: u8 = 0x54;
    pub const DID_PRIV_DATA_SPECIF: u8 = 0x5F;
}

/// SDT payload layout.
pub mod sdt_layout {
    /// original_network_id (2) + reserved_future_use (1), repeated in every section.
    pub const SHARED_PREFIX_SIZE: usize = 3;
    /// service_id (2) + flags (1) + status/CA/descriptors_loop_length (2).
    pub const SERVICE_HEADER_SIZE: usize = 5;
    /// Value of the reserved byte following original_network_id.
    pub const ONETW_RESERVED_BYTE: u8 = 0xFF;
    /// Low 12 bits of the status word: descriptors_loop_length.
    pub const LOOP_LENGTH_MASK: u16 = 0x0FFF;
    /// Largest descriptor on the wire: tag + length + 255 payload bytes.
    pub const MAX_DESCRIPTOR_SIZE: usize = 2 + 255;
    /// Smallest payload capacity in which a fresh section can always take
    /// one service header and any single descriptor.
    pub const MIN_PAYLOAD_CAPACITY: usize = SHARED_PREFIX_SIZE + SERVICE_HEADER_SIZE + MAX_DESCRIPTOR_SIZE;
    /// section_number is one byte.
    pub const MAX_SECTIONS: usize = 256;
}

/// Section header bit contracts.
pub mod section_bits {
    /// section_syntax_indicator.
    pub const SECTION_SYNTAX: u8 = 0x80;
    /// private_indicator.
    pub const PRIVATE: u8 = 0x40;
    /// Two reserved bits before section_length, always set.
    pub const LENGTH_RESERVED: u8 = 0x30;
    /// Two reserved bits before version_number, always set.
    pub const VERSION_RESERVED: u8 = 0xC0;
    /// Largest value of the 12-bit section_length field.
    pub const MAX_SECTION_LENGTH: usize = 0x0FFD;
    /// Version is a 5-bit field.
    pub const VERSION_MASK: u8 = 0x1F;
}
