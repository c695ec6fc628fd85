//! sdt/decode.rs
//! Rebuild an SDT from a set of sections.
//!
//! Design notes:
//! - Only table identity is checked strictly: the first section must be an
//!   SDT and every other section must carry the same table id.
//! - Inside a section, short reads are clamped, never fatal: a descriptor
//!   loop length larger than the payload is cut to what is left, and a tail
//!   shorter than a service header is ignored.
//! - A service_id seen again in a later section continues the same service.

use byteorder::{BigEndian, ByteOrder};
use tracing::{debug, warn};

use crate::constants::sdt_layout::{LOOP_LENGTH_MASK, SERVICE_HEADER_SIZE, SHARED_PREFIX_SIZE};
use crate::section::Section;
use crate::sdt::types::{status_bits, RunningStatus, Sdt, SdtError, ServiceFlags, TableKind};
use crate::telemetry::CodecCounters;

impl Sdt {
    /// Best-effort reconstruction; check [`Sdt::is_valid`] on the result.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut counters = CodecCounters::new();
        Self::from_sections_with_counters(sections, &mut counters)
    }

    pub fn from_sections_with_counters(sections: &[Section], counters: &mut CodecCounters) -> Self {
        match Self::try_from_sections_with_counters(sections, counters) {
            Ok(sdt) => sdt,
            Err(err) => {
                warn!(%err, sections = sections.len(), "SDT deserialization aborted");
                let kind = sections
                    .first()
                    .and_then(|s| TableKind::from_table_id(s.table_id()))
                    .unwrap_or(TableKind::Actual);
                Sdt::cleared(kind)
            }
        }
    }

    /// Replace the content of `self` with the table carried by `sections`.
    pub fn deserialize(&mut self, sections: &[Section]) {
        *self = Self::from_sections(sections);
    }

    /// Like [`Sdt::from_sections`] but reports why the set was rejected.
    pub fn try_from_sections(sections: &[Section]) -> Result<Self, SdtError> {
        let mut counters = CodecCounters::new();
        Self::try_from_sections_with_counters(sections, &mut counters)
    }

    pub fn try_from_sections_with_counters(sections: &[Section], counters: &mut CodecCounters) -> Result<Self, SdtError> {
        let first = sections.first().ok_or(SdtError::NoSection)?;
        let kind = TableKind::from_table_id(first.table_id())
            .ok_or(SdtError::UnexpectedTableId(first.table_id()))?;

        let mut sdt = Sdt::cleared(kind);

        for (index, section) in sections.iter().enumerate() {
            if section.table_id() != kind.table_id() {
                return Err(SdtError::TableIdMismatch {
                    index,
                    expected: kind.table_id(),
                    found: section.table_id(),
                });
            }

            // Common properties, the last section wins.
            sdt.set_version(section.header.version);
            sdt.is_current = section.header.is_current;
            sdt.ts_id = section.header.table_id_extension;

            let payload = &section.payload[..];
            if payload.len() < SHARED_PREFIX_SIZE {
                return Err(SdtError::PayloadTooShort { index, have: payload.len() });
            }
            sdt.onetw_id = BigEndian::read_u16(&payload[0..2]);

            debug!(section = section.header.section_number, payload = payload.len(), "parsing SDT section");
            counters.add_section();

            sdt.parse_services(&payload[SHARED_PREFIX_SIZE..], counters);
        }

        sdt.is_valid = true;
        Ok(sdt)
    }

    /// Parse the service loop of one section payload (shared prefix removed).
    fn parse_services(&mut self, mut data: &[u8], counters: &mut CodecCounters) {
        while data.len() >= SERVICE_HEADER_SIZE {
            let service_id = BigEndian::read_u16(&data[0..2]);
            let flags = ServiceFlags::from_bits_retain(data[2]);
            let word = BigEndian::read_u16(&data[3..5]);
            data = &data[SERVICE_HEADER_SIZE..];

            let eit_schedule = flags.contains(ServiceFlags::EIT_SCHEDULE);
            let eit_present_following = flags.contains(ServiceFlags::EIT_PF);
            let running_status = RunningStatus::from_bits((word >> status_bits::RUNNING_STATUS_SHIFT) as u8);
            let ca_controlled = word & status_bits::FREE_CA_MODE != 0;

            let continued = self.services.contains_key(&service_id);
            let service = self.service_mut(service_id);

            if continued
                && (service.eit_schedule != eit_schedule
                    || service.eit_present_following != eit_present_following
                    || service.running_status != running_status
                    || service.ca_controlled != ca_controlled)
            {
                debug!(service_id, "continued service header differs, keeping the latest values");
            }

            service.eit_schedule = eit_schedule;
            service.eit_present_following = eit_present_following;
            service.running_status = running_status;
            service.ca_controlled = ca_controlled;

            let declared = (word & LOOP_LENGTH_MASK) as usize;
            let length = declared.min(data.len());
            if length < declared {
                warn!(service_id, declared, available = data.len(), "descriptor loop length overruns section, clamped");
                counters.add_clamped_loop();
            }

            let before = service.descs.len();
            service.descs.parse_append(&data[..length]);
            counters.add_service_entry(service.descs.len() - before);

            data = &data[length..];
        }

        if !data.is_empty() {
            counters.add_ignored(data.len());
        }
    }
}
