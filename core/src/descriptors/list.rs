//! descriptors/list.rs
//! Ordered descriptor loop with incremental emission.
//!
//! Notes:
//! - Insertion order is preserved and duplicate tags are allowed.
//! - Emission never splits a descriptor: the first one that does not fit ends
//!   the emission, even if a later, smaller one would fit.
//! - Parsing is tolerant: a descriptor whose length overruns the buffer is
//!   kept with a truncated payload.

use std::collections::HashMap;
use std::ops::Index;

use tracing::trace;

use crate::constants::descriptor_ids::DID_EXTENDED_EVENT;
use crate::descriptors::types::Descriptor;

/// Result of one incremental emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emitted {
    /// Bytes appended to the output buffer.
    pub bytes_written: usize,
    /// Index of the first descriptor not written (`len()` when all were).
    pub next_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorList {
    descs: Vec<Descriptor>,
}

impl DescriptorList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Descriptor> {
        self.descs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Descriptor> {
        self.descs.get_mut(index)
    }

    /// Append a descriptor at the end of the list.
    pub fn add(&mut self, desc: Descriptor) {
        self.descs.push(desc);
    }

    /// Remove the descriptor at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Descriptor> {
        (index < self.descs.len()).then(|| self.descs.remove(index))
    }

    pub fn clear(&mut self) {
        self.descs.clear();
    }

    /// Index of the first descriptor with `tag`.
    #[inline]
    pub fn find(&self, tag: u8) -> Option<usize> {
        self.search(tag, 0)
    }

    /// Index of the first descriptor with `tag`, at or after `start`.
    pub fn search(&self, tag: u8, start: usize) -> Option<usize> {
        self.descs
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, d)| d.tag() == tag)
            .map(|(i, _)| i)
    }

    /// Sum of the binary sizes of all descriptors.
    pub fn binary_size(&self) -> usize {
        self.descs.iter().map(Descriptor::binary_size).sum()
    }

    /// Write whole descriptors from `start` while they fit in `capacity`.
    pub fn emit_prefix(&self, out: &mut Vec<u8>, capacity: usize, start: usize) -> Emitted {
        let mut written = 0usize;
        let mut index = start.min(self.descs.len());

        while let Some(desc) = self.descs.get(index) {
            let size = desc.binary_size();
            if written + size > capacity {
                trace!(index, size, remaining = capacity - written, "descriptor does not fit, stopping emission");
                break;
            }
            desc.write_to(out);
            written += size;
            index += 1;
        }

        Emitted { bytes_written: written, next_index: index }
    }

    /// Parse a descriptor loop and append its content.
    ///
    /// Returns the number of bytes turned into descriptors. A descriptor
    /// whose declared length overruns `wire` keeps the available bytes; a
    /// single trailing byte cannot form a descriptor and is left out.
    pub fn parse_append(&mut self, wire: &[u8]) -> usize {
        let mut off = 0usize;

        while wire.len() - off >= Descriptor::HEADER_LEN {
            let tag = wire[off];
            let declared = wire[off + 1] as usize;
            let available = wire.len() - off - Descriptor::HEADER_LEN;
            let len = declared.min(available);
            if len < declared {
                trace!(tag, declared, available, "truncating descriptor payload");
            }
            let start = off + Descriptor::HEADER_LEN;
            self.descs.push(Descriptor::new_truncated(tag, &wire[start..start + len]));
            off = start + len;
        }

        off
    }

    /// Build a list from a descriptor loop, see [`Self::parse_append`].
    pub fn from_bytes(wire: &[u8]) -> Self {
        let mut list = Self::new();
        list.parse_append(wire);
        list
    }

    /// Serialize the whole loop.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.binary_size());
        for desc in &self.descs {
            desc.write_to(&mut out);
        }
        out
    }

    /// Renumber every extended_event_descriptor per language.
    ///
    /// For each ISO-639 language code, descriptors are numbered 0..n in list
    /// order and all of them get `last_descriptor_number = n - 1` (4 bits each).
    /// Descriptors too short to carry a language code are left untouched.
    pub fn normalize_extended_event_numbering(&mut self) {
        fn is_candidate(d: &Descriptor) -> bool {
            d.tag() == DID_EXTENDED_EVENT && d.payload_size() >= 4 // number byte + 3-byte language code
        }
        fn lang_of(d: &Descriptor) -> [u8; 3] {
            [d.payload()[1], d.payload()[2], d.payload()[3]]
        }

        let mut last: HashMap<[u8; 3], usize> = HashMap::new();
        for desc in self.descs.iter().filter(|d| is_candidate(d)) {
            last.entry(lang_of(desc)).and_modify(|n| *n += 1).or_insert(0);
        }

        let mut next: HashMap<[u8; 3], usize> = HashMap::new();
        for desc in self.descs.iter_mut() {
            if !is_candidate(desc) {
                continue;
            }
            let lang = lang_of(desc);
            let index = next.entry(lang).or_insert(0);
            let last_number = last.get(&lang).copied().unwrap_or(0);
            desc.payload_mut()[0] = (((*index & 0x0F) << 4) | (last_number & 0x0F)) as u8;
            *index += 1;
        }
    }
}

impl Index<usize> for DescriptorList {
    type Output = Descriptor;

    fn index(&self, index: usize) -> &Descriptor {
        &self.descs[index]
    }
}

impl FromIterator<Descriptor> for DescriptorList {
    fn from_iter<I: IntoIterator<Item = Descriptor>>(iter: I) -> Self {
        Self { descs: iter.into_iter().collect() }
    }
}

impl Extend<Descriptor> for DescriptorList {
    fn extend<I: IntoIterator<Item = Descriptor>>(&mut self, iter: I) {
        self.descs.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DescriptorList {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descs.iter()
    }
}

impl IntoIterator for DescriptorList {
    type Item = Descriptor;
    type IntoIter = std::vec::IntoIter<Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descs.into_iter()
    }
}
