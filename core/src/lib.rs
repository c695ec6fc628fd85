//! sdt-core
//!
//! Service Description Table codec: splits a logical SDT into PSI long
//! sections and rebuilds it from possibly damaged sections.
//! Pure, synchronous value transformations; no I/O, no threads.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Protocol layers
pub mod descriptors;
pub mod section;
pub mod sdt;

pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::descriptors::{Descriptor, DescriptorList};
    pub use crate::sdt::{RunningStatus, Sdt, SdtSerializeOptions, Service, TableKind};
    pub use crate::section::{decode_section, encode_section, Section, SectionHeader};
    pub use crate::telemetry::CodecCounters;
    pub use crate::types::CodecError;
}
