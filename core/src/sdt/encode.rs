//! sdt/encode.rs
//! Split an SDT into long sections.
//!
//! Payload of every section:
//!
//! ```text
//! [ original_network_id (2) ][ reserved 0xFF (1) ]       shared prefix
//! repeated:
//! [ service_id (2) ]
//! [ 0b111111 | EIT_schedule | EIT_pf (1) ]
//! [ running_status (3 bits) | free_CA (1 bit) | loop_length (12 bits) ]
//! [ descriptors (loop_length) ]
//! ```
//!
//! A service is kept in one section whenever it fits in a fresh one. A
//! service too large for any section has its descriptor loop continued in the
//! next section(s), with its 5-byte header repeated.

use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;
use tracing::{debug, warn};

use crate::constants::sdt_layout::{
    LOOP_LENGTH_MASK, MAX_SECTIONS, ONETW_RESERVED_BYTE, SERVICE_HEADER_SIZE, SHARED_PREFIX_SIZE,
};
use crate::section::{Section, SectionHeader};
use crate::sdt::types::{status_bits, Sdt, SdtSerializeOptions, Service, ServiceFlags};
use crate::telemetry::CodecCounters;

/// Accumulates one section payload at a time.
struct SectionBuilder<'a> {
    table: &'a Sdt,
    max_payload: usize,
    payload: Vec<u8>,
    sections: Vec<Section>,
    /// Services with an entry in the open payload.
    open_services: usize,
    overflow: bool,
}

impl<'a> SectionBuilder<'a> {
    fn new(table: &'a Sdt, max_payload: usize) -> Self {
        let mut payload = Vec::with_capacity(max_payload);
        let mut prefix = [0u8; SHARED_PREFIX_SIZE];
        BigEndian::write_u16(&mut prefix[0..2], table.onetw_id);
        prefix[2] = ONETW_RESERVED_BYTE;
        payload.extend_from_slice(&prefix);

        Self { table, max_payload, payload, sections: Vec::new(), open_services: 0, overflow: false }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.max_payload - self.payload.len()
    }

    /// Something beyond the shared prefix has been written.
    #[inline]
    fn has_entries(&self) -> bool {
        self.payload.len() > SHARED_PREFIX_SIZE
    }

    /// Close the current section and restart right after the shared prefix.
    fn add_section(&mut self, counters: &mut CodecCounters) {
        if self.sections.len() >= MAX_SECTIONS {
            self.overflow = true;
            counters.add_dropped(self.open_services);
        } else {
            let number = self.sections.len() as u8;
            let header = SectionHeader {
                table_id: self.table.table_id(),
                table_id_extension: self.table.ts_id,
                version: self.table.version,
                is_current: self.table.is_current,
                section_number: number,
                last_section_number: number,
            };
            debug!(section = number, payload = self.payload.len(), "closing SDT section");
            self.sections.push(Section { header, payload: Bytes::copy_from_slice(&self.payload) });
            counters.add_section();
        }
        self.payload.truncate(SHARED_PREFIX_SIZE);
        self.open_services = 0;
    }

    /// Write the service header followed by as many descriptors as fit,
    /// starting at `start`. Returns the index of the next descriptor to write.
    fn write_service(&mut self, service_id: u16, service: &Service, start: usize, counters: &mut CodecCounters) -> usize {
        debug_assert!(self.remaining() >= SERVICE_HEADER_SIZE);

        let mut flags = ServiceFlags::RESERVED;
        flags.set(ServiceFlags::EIT_SCHEDULE, service.eit_schedule);
        flags.set(ServiceFlags::EIT_PF, service.eit_present_following);

        let mut head = [0u8; 3];
        BigEndian::write_u16(&mut head[0..2], service_id);
        head[2] = flags.bits();
        self.payload.extend_from_slice(&head);

        // loop length placeholder, patched once the descriptors are written
        let length_pos = self.payload.len();
        self.payload.extend_from_slice(&[0, 0]);

        let capacity = self.remaining();
        let emitted = service.descs.emit_prefix(&mut self.payload, capacity, start);

        let mut word = (emitted.bytes_written as u16) & LOOP_LENGTH_MASK;
        word |= u16::from(service.running_status.bits()) << status_bits::RUNNING_STATUS_SHIFT;
        if service.ca_controlled {
            word |= status_bits::FREE_CA_MODE;
        }
        BigEndian::write_u16(&mut self.payload[length_pos..length_pos + 2], word);
        self.open_services += 1;

        counters.add_service_entry(emitted.next_index.saturating_sub(start));
        emitted.next_index
    }

    fn finish(mut self, counters: &mut CodecCounters) -> Vec<Section> {
        if self.has_entries() || self.sections.is_empty() {
            self.add_section(counters);
        }

        let last = self.sections.len().saturating_sub(1) as u8;
        for section in &mut self.sections {
            section.header.last_section_number = last;
        }
        self.sections
    }
}

impl Sdt {
    /// Serialize into sections of the maximum standard size.
    pub fn serialize(&self) -> Vec<Section> {
        self.serialize_with(&SdtSerializeOptions::default())
    }

    pub fn serialize_with(&self, options: &SdtSerializeOptions) -> Vec<Section> {
        let mut counters = CodecCounters::new();
        self.serialize_with_counters(options, &mut counters)
    }

    /// Serialize and account for the work in `counters`.
    ///
    /// An invalid table yields no section; a valid empty table yields one
    /// section holding only the shared prefix.
    pub fn serialize_with_counters(&self, options: &SdtSerializeOptions, counters: &mut CodecCounters) -> Vec<Section> {
        if !self.is_valid {
            debug!("invalid SDT, nothing to serialize");
            return Vec::new();
        }

        let mut builder = SectionBuilder::new(self, options.effective_max_payload());

        for (&service_id, service) in &self.services {
            if builder.overflow {
                counters.add_dropped(1);
                continue;
            }

            // not even room for the fixed part
            if builder.remaining() < SERVICE_HEADER_SIZE {
                builder.add_section(counters);
            }

            // Keep the whole service in one section when a fresh one can hold it.
            if SERVICE_HEADER_SIZE + service.descs.binary_size() > builder.remaining() && builder.has_entries() {
                builder.add_section(counters);
            }
            if builder.overflow {
                counters.add_dropped(1);
                continue;
            }

            let mut next = builder.write_service(service_id, service, 0, counters);

            if next < service.descs.len() {
                counters.add_split();
            }
            while next < service.descs.len() {
                debug!(service_id, next_descriptor = next, "descriptor loop continues in next section");
                builder.add_section(counters);
                if builder.overflow {
                    break;
                }
                next = builder.write_service(service_id, service, next, counters);
            }
        }

        if builder.overflow {
            warn!(dropped = counters.services_dropped, "SDT needs more than {} sections, output truncated", MAX_SECTIONS);
        }

        builder.finish(counters)
    }
}
