//! sdt/types.rs
//! Service Description Table model.
//!
//! Notes:
//! - Services are kept in a `BTreeMap` so iteration (and therefore emission)
//!   follows increasing service_id, whatever the insertion order.
//! - `is_valid` is computed by deserialization, never assumed; an invalid
//!   table serializes to zero sections.

use std::collections::BTreeMap;
use std::fmt;

use num_enum::TryFromPrimitive;

use crate::constants::sdt_layout::MIN_PAYLOAD_CAPACITY;
use crate::constants::section_bits::VERSION_MASK;
use crate::constants::MAX_PSI_LONG_SECTION_PAYLOAD_SIZE;
use crate::descriptors::DescriptorList;
use crate::utils::enum_name_or_hex;

bitflags::bitflags! {
    /// Third byte of a service entry.
    ///
    /// Bits 2..7 are reserved_future_use and must be written as ones; a
    /// decoder ignores them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ServiceFlags: u8 {
        /// EIT_present_following_flag
        const EIT_PF = 0b0000_0001;
        /// EIT_schedule_flag
        const EIT_SCHEDULE = 0b0000_0010;
        /// reserved_future_use
        const RESERVED = 0b1111_1100;
    }
}

/// Bits of the 16-bit word holding the descriptor loop length.
pub mod status_bits {
    pub const RUNNING_STATUS_SHIFT: u16 = 13;
    pub const RUNNING_STATUS_MASK: u8 = 0x07;
    pub const FREE_CA_MODE: u16 = 0x1000;
}

/// Which of the two SDT variants a table is.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum TableKind {
    /// SDT Actual (`TID_SDT_ACT`): describes the transport stream carrying it.
    Actual = 0x42,
    /// SDT Other (`TID_SDT_OTH`): describes another transport stream.
    Other = 0x46,
}

impl TableKind {
    #[inline]
    pub const fn table_id(self) -> u8 {
        self as u8
    }

    pub fn from_table_id(table_id: u8) -> Option<Self> {
        Self::try_from_primitive(table_id).ok()
    }

    pub const fn is_actual(self) -> bool {
        matches!(self, TableKind::Actual)
    }
}

/// DVB running_status values (3 bits).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum RunningStatus {
    Undefined = 0,
    NotRunning = 1,
    StartingSoon = 2,
    Pausing = 3,
    Running = 4,
    OffAir = 5,
    Reserved6 = 6,
    Reserved7 = 7,
}

impl Default for RunningStatus {
    fn default() -> Self {
        RunningStatus::Undefined
    }
}

impl RunningStatus {
    /// Every 3-bit value maps to a variant.
    pub fn from_bits(raw: u8) -> Self {
        match Self::try_from_primitive(raw & status_bits::RUNNING_STATUS_MASK) {
            Ok(status) => status,
            Err(_) => RunningStatus::Undefined,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            RunningStatus::Undefined => "undefined",
            RunningStatus::NotRunning => "not running",
            RunningStatus::StartingSoon => "starts in a few seconds",
            RunningStatus::Pausing => "pausing",
            RunningStatus::Running => "running",
            RunningStatus::OffAir => "off-air",
            RunningStatus::Reserved6 | RunningStatus::Reserved7 => "reserved",
        }
    }
}

/// One service entry of an SDT.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub eit_schedule: bool,
    pub eit_present_following: bool,
    /// Read with [`Service::running_status`], written with
    /// [`Service::set_running_status`].
    pub(crate) running_status: RunningStatus,
    /// free_CA_mode
    pub ca_controlled: bool,
    pub descs: DescriptorList,
}

/// Service Description Table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sdt {
    pub(crate) is_valid: bool,
    pub kind: TableKind,
    /// 5-bit version number, see [`Sdt::version`].
    pub(crate) version: u8,
    pub is_current: bool,
    /// transport_stream_id, carried as table_id_extension.
    pub ts_id: u16,
    /// original_network_id, repeated at the start of every section payload.
    pub onetw_id: u16,
    pub services: BTreeMap<u16, Service>,
}

impl Default for Sdt {
    /// Empty and valid SDT Actual, version 0, current.
    fn default() -> Self {
        Self::new(TableKind::Actual, 0, true, 0, 0)
    }
}

impl Sdt {
    /// `version` is reduced to its 5 wire bits.
    pub fn new(kind: TableKind, version: u8, is_current: bool, ts_id: u16, onetw_id: u16) -> Self {
        Self {
            is_valid: true,
            kind,
            version: version & VERSION_MASK,
            is_current,
            ts_id,
            onetw_id,
            services: BTreeMap::new(),
        }
    }

    /// Empty table in the state deserialization starts from.
    pub(crate) fn cleared(kind: TableKind) -> Self {
        Self {
            is_valid: false,
            kind,
            version: 0,
            is_current: true,
            ts_id: 0,
            onetw_id: 0,
            services: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Mark the table invalid; it will serialize to nothing.
    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Set the version, keeping the 5 wire bits only.
    pub fn set_version(&mut self, version: u8) {
        self.version = version & VERSION_MASK;
    }

    #[inline]
    pub fn table_id(&self) -> u8 {
        self.kind.table_id()
    }

    /// Service entry for `service_id`, created empty if missing.
    pub fn service_mut(&mut self, service_id: u16) -> &mut Service {
        self.services.entry(service_id).or_default()
    }

    pub fn summary(&self) -> String {
        format!(
            "Sdt {{ table_id: {}, valid: {}, version: {}, current: {}, ts_id: 0x{:04X}, onetw_id: 0x{:04X}, services: {} }}",
            enum_name_or_hex::<TableKind>(self.table_id()),
            self.is_valid,
            self.version,
            self.is_current,
            self.ts_id,
            self.onetw_id,
            self.services.len(),
        )
    }
}

/// Serialization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdtSerializeOptions {
    /// Payload capacity of each section. Clamped to
    /// `[MIN_PAYLOAD_CAPACITY, MAX_PSI_LONG_SECTION_PAYLOAD_SIZE]`.
    pub max_payload: usize,
}

impl Default for SdtSerializeOptions {
    fn default() -> Self {
        Self { max_payload: MAX_PSI_LONG_SECTION_PAYLOAD_SIZE }
    }
}

impl SdtSerializeOptions {
    pub fn with_max_payload(max_payload: usize) -> Self {
        Self { max_payload }
    }

    /// Capacity actually used by the encoder.
    pub fn effective_max_payload(&self) -> usize {
        self.max_payload.clamp(MIN_PAYLOAD_CAPACITY, MAX_PSI_LONG_SECTION_PAYLOAD_SIZE)
    }
}

/// Reasons a section set cannot be turned into a valid SDT.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdtError {
    #[error("no section to deserialize")]
    NoSection,

    #[error("unexpected table id {}", table_id_name(.0))]
    UnexpectedTableId(u8),

    #[error("section {index}: table id 0x{found:02X} differs from 0x{expected:02X}")]
    TableIdMismatch { index: usize, expected: u8, found: u8 },

    #[error("section {index}: payload too short ({have} < 3)")]
    PayloadTooShort { index: usize, have: usize },
}

fn table_id_name(raw: &u8) -> String {
    enum_name_or_hex::<TableKind>(*raw)
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Actual => write!(f, "SDT Actual"),
            TableKind::Other => write!(f, "SDT Other"),
        }
    }
}
