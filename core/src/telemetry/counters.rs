//! telemetry/counters.rs
//! Counters filled while serializing or deserializing a table.
//!
//! Summary: one value per call, merged by the caller when tables are
//! processed in batches (no locks or atomics inside the codec).

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    /// Sections produced or consumed.
    pub sections: u64,
    /// Service entries written or read (a continued entry counts once per section).
    pub service_entries: u64,
    /// Descriptors written or parsed.
    pub descriptors: u64,
    /// Services whose descriptor loop spans more than one section.
    pub services_split: u64,
    /// Descriptor loops whose declared length overran the payload.
    pub clamped_loops: u64,
    /// Trailing payload bytes too short to form a service entry.
    pub ignored_bytes: u64,
    /// Services missing from the output, wholly or partly, because the table
    /// needed more than 256 sections.
    pub services_dropped: u64,
}

impl CodecCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self) {
        self.sections += 1;
    }

    pub fn add_service_entry(&mut self, descriptors: usize) {
        self.service_entries += 1;
        self.descriptors += descriptors as u64;
    }

    pub fn add_split(&mut self) {
        self.services_split += 1;
    }

    pub fn add_clamped_loop(&mut self) {
        self.clamped_loops += 1;
    }

    pub fn add_ignored(&mut self, bytes: usize) {
        self.ignored_bytes += bytes as u64;
    }

    pub fn add_dropped(&mut self, services: usize) {
        self.services_dropped += services as u64;
    }

    /// Anything that suggests the input was damaged or the output incomplete.
    pub fn has_anomalies(&self) -> bool {
        self.clamped_loops > 0 || self.ignored_bytes > 0 || self.services_dropped > 0
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.sections += other.sections;
        self.service_entries += other.service_entries;
        self.descriptors += other.descriptors;
        self.services_split += other.services_split;
        self.clamped_loops += other.clamped_loops;
        self.ignored_bytes += other.ignored_bytes;
        self.services_dropped += other.services_dropped;
    }

    /// JSON snapshot for logs or reports.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
