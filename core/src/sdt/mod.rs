//! Service Description Table codec.
//!
//! Responsibilities:
//! - Model the table, its services and their descriptor loops
//! - Split a table into long sections (`encode`)
//! - Rebuild a table from sections, tolerating damaged payloads (`decode`)
//! - Service name/provider/type helpers (`service`)
//! - JSON form (`text`)
//!
//! Non-responsibilities:
//! - Section transport and demultiplexing
//! - DVB character set conversion

pub mod types;
pub mod encode;
pub mod decode;
pub mod service;
pub mod text;

pub use types::{
    RunningStatus,
    Sdt,
    SdtError,
    SdtSerializeOptions,
    Service,
    ServiceFlags,
    TableKind,
};
pub use text::TextError;
