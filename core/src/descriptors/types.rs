//! descriptors/types.rs
//! A single tagged block: `[tag (1)][length (1)][payload (length)]`.

use std::fmt;

use crate::utils::fmt_bytes;

/// Largest payload a one-byte length prefix can describe.
pub const MAX_DESCRIPTOR_PAYLOAD: usize = 0xFF;

/// Binary descriptor. Only tag and payload are meaningful; two descriptors
/// are equal when both match byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    tag: u8,
    payload: Vec<u8>,
}

impl Descriptor {
    /// Tag byte + length byte.
    pub const HEADER_LEN: usize = 2;

    /// Build a descriptor from a tag and a payload.
    pub fn new(tag: u8, payload: impl Into<Vec<u8>>) -> Result<Self, DescriptorError> {
        let payload = payload.into();
        if payload.len() > MAX_DESCRIPTOR_PAYLOAD {
            return Err(DescriptorError::PayloadTooLarge { have: payload.len() });
        }
        Ok(Self { tag, payload })
    }

    /// Build a descriptor, silently truncating the payload to 255 bytes.
    pub fn new_truncated(tag: u8, payload: &[u8]) -> Self {
        let len = payload.len().min(MAX_DESCRIPTOR_PAYLOAD);
        Self { tag, payload: payload[..len].to_vec() }
    }

    /// Parse one complete descriptor from the head of `wire`.
    ///
    /// Strict: the declared length must be fully present. Use
    /// [`DescriptorList::parse_append`](crate::descriptors::DescriptorList::parse_append)
    /// for tolerant parsing of a whole loop.
    pub fn from_bytes(wire: &[u8]) -> Result<Self, DescriptorError> {
        if wire.len() < Self::HEADER_LEN {
            return Err(DescriptorError::Truncated { have: wire.len(), need: Self::HEADER_LEN });
        }
        let need = Self::HEADER_LEN + wire[1] as usize;
        if wire.len() < need {
            return Err(DescriptorError::Truncated { have: wire.len(), need });
        }
        Ok(Self { tag: wire[0], payload: wire[Self::HEADER_LEN..need].to_vec() })
    }

    #[inline]
    pub fn tag(&self) -> u8 {
        self.tag
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn payload_size(&self) -> usize {
        self.payload.len()
    }

    /// Size on the wire: header + payload.
    #[inline]
    pub fn binary_size(&self) -> usize {
        Self::HEADER_LEN + self.payload.len()
    }

    /// Replace the whole payload, truncating to 255 bytes.
    pub fn replace_payload(&mut self, payload: &[u8]) {
        let len = payload.len().min(MAX_DESCRIPTOR_PAYLOAD);
        self.payload.clear();
        self.payload.extend_from_slice(&payload[..len]);
    }

    /// Mutable view of the payload. Its length cannot change through this view.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Append the wire form to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.tag);
        out.push(self.payload.len() as u8);
        out.extend_from_slice(&self.payload);
    }

    /// Wire form as a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.binary_size());
        self.write_to(&mut out);
        out
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "descriptor 0x{:02X} ({} bytes): {}", self.tag, self.payload.len(), fmt_bytes(&self.payload))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// Payload does not fit the one-byte length prefix.
    #[error("descriptor payload too large: {have} > 255")]
    PayloadTooLarge { have: usize },

    /// Buffer shorter than the declared descriptor.
    #[error("descriptor truncated: {have} < {need}")]
    Truncated { have: usize, need: usize },
}
