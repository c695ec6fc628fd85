//! PSI long sections.
//!
//! Responsibilities:
//! - Define the section header and the section container
//! - Encode sections into the canonical byte layout (with CRC32)
//! - Decode sections with strict validation
//!
//! Non-responsibilities:
//! - Packetization into transport stream packets
//! - Table semantics (see `sdt`)

pub mod types;
pub mod encode;
pub mod decode;
pub mod crc;

pub use types::{
    Section,
    SectionHeader,
    SectionError,
};
pub use encode::encode_section;
pub use decode::{
    parse_section_header,
    decode_section,
};
