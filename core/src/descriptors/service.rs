//! descriptors/service.rs
//! Nested layout of the service_descriptor payload.
//!
//! ```text
//! [ service_type (1) ]
//! [ provider_len (1) ][ provider (provider_len) ]
//! [ name_len     (1) ][ name     (name_len)     ]
//! ```
//!
//! Readers clamp every length prefix to the bytes actually present and fall
//! back to empty values. Writers truncate strings so the whole payload stays
//! within the 255-byte descriptor limit.

use crate::descriptors::types::MAX_DESCRIPTOR_PAYLOAD;

/// service_type + provider_len + name_len.
const FIXED_LEN: usize = 3;

/// Borrowed, tolerant view over a service_descriptor payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptorView<'a> {
    pub service_type: u8,
    pub provider: &'a [u8],
    pub name: &'a [u8],
}

impl<'a> ServiceDescriptorView<'a> {
    pub fn parse(payload: &'a [u8]) -> Self {
        let service_type = payload.first().copied().unwrap_or(0);
        if payload.len() < 2 {
            return Self { service_type, provider: &[], name: &[] };
        }

        let provider_len = (payload[1] as usize).min(payload.len() - 2);
        let provider = &payload[2..2 + provider_len];

        let rest = &payload[2 + provider_len..];
        let name = match rest.split_first() {
            Some((&len, bytes)) => &bytes[..(len as usize).min(bytes.len())],
            None => &[][..],
        };

        Self { service_type, provider, name }
    }

    /// Whether the payload holds at least the type and provider length.
    pub fn is_well_formed(payload: &[u8]) -> bool {
        payload.len() >= 2
    }
}

/// Serialize a service_descriptor payload.
///
/// The provider keeps priority: it is truncated first to leave room for the
/// fixed bytes, then the name gets whatever space remains.
pub fn build_payload(service_type: u8, provider: &[u8], name: &[u8]) -> Vec<u8> {
    let room = MAX_DESCRIPTOR_PAYLOAD - FIXED_LEN;
    let provider = &provider[..provider.len().min(room)];
    let name = &name[..name.len().min(room - provider.len())];

    let mut out = Vec::with_capacity(FIXED_LEN + provider.len() + name.len());
    out.push(service_type);
    out.push(provider.len() as u8);
    out.extend_from_slice(provider);
    out.push(name.len() as u8);
    out.extend_from_slice(name);
    out
}
