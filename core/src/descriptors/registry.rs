//! descriptors/registry.rs
//! Display names of well-known descriptor tags.
//!
//! The binary codec never consults this table; it only feeds the text form
//! and log output.

use crate::constants::descriptor_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorInfo {
    pub tag: u8,
    pub name: &'static str,
    pub xml_name: &'static str,
}

const KNOWN: &[DescriptorInfo] = &[
    DescriptorInfo { tag: descriptor_ids::DID_DATA_ALIGN, name: "Data Stream Alignment", xml_name: "data_stream_alignment_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_DEFERRED_ASSOC_TAGS, name: "Deferred Association Tags", xml_name: "deferred_association_tags_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_SL, name: "SL", xml_name: "SL_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_TRANSPORT_PROFILE, name: "Transport Profile", xml_name: "transport_profile_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_NETWORK_NAME, name: "Network Name", xml_name: "network_name_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_SERVICE_LIST, name: "Service List", xml_name: "service_list_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_SERVICE, name: "Service", xml_name: "service_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_LINKAGE, name: "Linkage", xml_name: "linkage_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_SHORT_EVENT, name: "Short Event", xml_name: "short_event_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_EXTENDED_EVENT, name: "Extended Event", xml_name: "extended_event_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_CA_IDENTIFIER, name: "CA Identifier", xml_name: "CA_identifier_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_CONTENT, name: "Content", xml_name: "content_descriptor" },
    DescriptorInfo { tag: descriptor_ids::DID_PRIV_DATA_SPECIF, name: "Private Data Specifier", xml_name: "private_data_specifier_descriptor" },
];

/// Element name used for descriptors with no registry entry.
pub const GENERIC_XML_NAME: &str = "generic_descriptor";

pub fn resolve(tag: u8) -> Option<DescriptorInfo> {
    KNOWN.iter().copied().find(|info| info.tag == tag)
}

/// Display name, or the hex tag for unknown descriptors.
pub fn name_or_hex(tag: u8) -> String {
    match resolve(tag) {
        Some(info) => info.name.to_string(),
        None => format!("0x{:02X}", tag),
    }
}

pub fn xml_name(tag: u8) -> &'static str {
    resolve(tag).map_or(GENERIC_XML_NAME, |info| info.xml_name)
}

/// Reverse lookup from an XML element name.
pub fn resolve_xml_name(xml_name: &str) -> Option<DescriptorInfo> {
    KNOWN.iter().copied().find(|info| info.xml_name.eq_ignore_ascii_case(xml_name))
}
