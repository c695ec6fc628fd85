//! Descriptors (tagged blocks) and descriptor loops.
//!
//! Responsibilities:
//! - Own the binary form of a single descriptor and of an ordered loop
//! - Incremental loop emission bounded by a byte capacity
//! - Tolerant loop parsing (truncation, never out-of-bounds)
//! - Sub-field helpers for the service_descriptor
//!
//! Non-responsibilities:
//! - Typed decoding of every descriptor kind
//! - Character set conversion of text fields

pub mod types;
pub mod list;
pub mod registry;
pub mod service;

pub use types::{Descriptor, DescriptorError, MAX_DESCRIPTOR_PAYLOAD};
pub use list::{DescriptorList, Emitted};
pub use registry::DescriptorInfo;
pub use service::{ServiceDescriptorView, build_payload};
