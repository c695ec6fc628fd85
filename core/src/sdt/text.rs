//! sdt/text.rs
//! JSON form of an SDT.
//!
//! Lossless alternate encoding of the binary model: every descriptor keeps
//! its raw payload as hex. The registry name is informative only and ignored
//! when reading back.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::descriptors::{registry, Descriptor, DescriptorError, DescriptorList};
use crate::sdt::types::{RunningStatus, Sdt, Service, TableKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindDoc {
    Actual,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DescriptorDoc {
    tag: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceDoc {
    service_id: u16,
    #[serde(default)]
    eit_schedule: bool,
    #[serde(default)]
    eit_present_following: bool,
    #[serde(default)]
    running_status: u8,
    #[serde(default)]
    ca_controlled: bool,
    #[serde(default)]
    descriptors: Vec<DescriptorDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SdtDoc {
    kind: KindDoc,
    version: u8,
    #[serde(default = "default_current")]
    is_current: bool,
    ts_id: u16,
    onetw_id: u16,
    #[serde(default)]
    services: Vec<ServiceDoc>,
}

fn default_current() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("cannot render an invalid SDT")]
    InvalidTable,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("service 0x{service_id:04X}: invalid hex payload: {source}")]
    Hex { service_id: u16, #[source] source: hex::FromHexError },

    #[error("service 0x{service_id:04X}: {source}")]
    Descriptor { service_id: u16, #[source] source: DescriptorError },

    #[error("version {0} does not fit 5 bits")]
    InvalidVersion(u8),

    #[error("running_status {0} does not fit 3 bits")]
    InvalidRunningStatus(u8),

    #[error("service 0x{0:04X} listed twice")]
    DuplicateService(u16),
}

fn descriptor_doc(desc: &Descriptor) -> DescriptorDoc {
    DescriptorDoc {
        tag: desc.tag(),
        name: registry::resolve(desc.tag()).map(|info| info.xml_name.to_string()),
        payload: hex::encode(desc.payload()),
    }
}

fn service_doc(service_id: u16, service: &Service) -> ServiceDoc {
    ServiceDoc {
        service_id,
        eit_schedule: service.eit_schedule,
        eit_present_following: service.eit_present_following,
        running_status: service.running_status.bits(),
        ca_controlled: service.ca_controlled,
        descriptors: service.descs.iter().map(descriptor_doc).collect(),
    }
}

fn service_from_doc(doc: &ServiceDoc) -> Result<Service, TextError> {
    let running_status = RunningStatus::try_from_primitive(doc.running_status)
        .map_err(|_| TextError::InvalidRunningStatus(doc.running_status))?;

    let mut descs = DescriptorList::new();
    for d in &doc.descriptors {
        let payload = hex::decode(&d.payload)
            .map_err(|source| TextError::Hex { service_id: doc.service_id, source })?;
        let desc = Descriptor::new(d.tag, payload)
            .map_err(|source| TextError::Descriptor { service_id: doc.service_id, source })?;
        descs.add(desc);
    }

    Ok(Service {
        eit_schedule: doc.eit_schedule,
        eit_present_following: doc.eit_present_following,
        running_status,
        ca_controlled: doc.ca_controlled,
        descs,
    })
}

/// Render a valid SDT as pretty-printed JSON.
pub fn to_json(sdt: &Sdt) -> Result<String, TextError> {
    if !sdt.is_valid() {
        return Err(TextError::InvalidTable);
    }

    let doc = SdtDoc {
        kind: match sdt.kind {
            TableKind::Actual => KindDoc::Actual,
            TableKind::Other => KindDoc::Other,
        },
        version: sdt.version,
        is_current: sdt.is_current,
        ts_id: sdt.ts_id,
        onetw_id: sdt.onetw_id,
        services: sdt.services.iter().map(|(&id, s)| service_doc(id, s)).collect(),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse the JSON form back into a valid SDT.
pub fn from_json(text: &str) -> Result<Sdt, TextError> {
    let doc: SdtDoc = serde_json::from_str(text)?;
    if doc.version > 0x1F {
        return Err(TextError::InvalidVersion(doc.version));
    }

    let kind = match doc.kind {
        KindDoc::Actual => TableKind::Actual,
        KindDoc::Other => TableKind::Other,
    };
    let mut sdt = Sdt::new(kind, doc.version, doc.is_current, doc.ts_id, doc.onetw_id);

    for service in &doc.services {
        if sdt.services.contains_key(&service.service_id) {
            return Err(TextError::DuplicateService(service.service_id));
        }
        sdt.services.insert(service.service_id, service_from_doc(service)?);
    }

    Ok(sdt)
}

impl Sdt {
    pub fn to_json(&self) -> Result<String, TextError> {
        to_json(self)
    }

    pub fn from_json(text: &str) -> Result<Self, TextError> {
        from_json(text)
    }
}
