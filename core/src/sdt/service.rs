//! sdt/service.rs
//! Service name, provider and type, read from and written to the first
//! service_descriptor of a service.
//!
//! Getters never fail: a missing or short descriptor yields 0 / "".
//! Setters rewrite the first service_descriptor in place, or add one when
//! the service has none. A descriptor too short to be parsed is replaced by
//! a well-formed one at the same position.

use crate::constants::descriptor_ids::DID_SERVICE;
use crate::descriptors::{build_payload, Descriptor, ServiceDescriptorView};
use crate::sdt::types::{RunningStatus, Sdt, Service};
use crate::utils::similar_strings;

impl Service {
    fn service_descriptor(&self) -> Option<&Descriptor> {
        self.descs.find(DID_SERVICE).and_then(|i| self.descs.get(i))
    }

    fn view(&self) -> Option<ServiceDescriptorView<'_>> {
        self.service_descriptor().map(|d| ServiceDescriptorView::parse(d.payload()))
    }

    /// Store `payload` in the first service_descriptor, creating it if needed.
    fn store_service_payload(&mut self, payload: &[u8]) {
        match self.descs.find(DID_SERVICE).and_then(|i| self.descs.get_mut(i)) {
            Some(desc) => desc.replace_payload(payload),
            None => self.descs.add(Descriptor::new_truncated(DID_SERVICE, payload)),
        }
    }

    pub fn service_type(&self) -> u8 {
        self.view().map_or(0, |v| v.service_type)
    }

    pub fn provider_name(&self) -> String {
        self.view().map_or_else(String::new, |v| String::from_utf8_lossy(v.provider).into_owned())
    }

    pub fn service_name(&self) -> String {
        self.view().map_or_else(String::new, |v| String::from_utf8_lossy(v.name).into_owned())
    }

    pub fn has_name(&self) -> bool {
        self.view().is_some_and(|v| !v.name.is_empty())
    }

    pub fn running_status(&self) -> RunningStatus {
        self.running_status
    }

    pub fn set_running_status(&mut self, status: RunningStatus) {
        self.running_status = status;
    }

    /// Set the service name, keeping type and provider.
    ///
    /// `service_type` is only used when no usable descriptor exists.
    pub fn set_name(&mut self, name: &str, service_type: u8) {
        let (service_type, provider) = match self.service_descriptor() {
            Some(d) if ServiceDescriptorView::is_well_formed(d.payload()) => {
                let view = ServiceDescriptorView::parse(d.payload());
                (view.service_type, view.provider.to_vec())
            }
            _ => (service_type, Vec::new()),
        };
        self.store_service_payload(&build_payload(service_type, &provider, name.as_bytes()));
    }

    /// Set the provider name, keeping type and service name.
    ///
    /// `service_type` is only used when the descriptor carries no type.
    pub fn set_provider(&mut self, provider: &str, service_type: u8) {
        let (service_type, name) = match self.service_descriptor() {
            Some(d) if !d.payload().is_empty() => {
                let view = ServiceDescriptorView::parse(d.payload());
                (view.service_type, view.name.to_vec())
            }
            _ => (service_type, Vec::new()),
        };
        self.store_service_payload(&build_payload(service_type, provider.as_bytes(), &name));
    }

    /// Set the service type, keeping both names.
    pub fn set_type(&mut self, service_type: u8) {
        let index = self.descs.find(DID_SERVICE);
        match index.and_then(|i| self.descs.get_mut(i)) {
            Some(desc) if ServiceDescriptorView::is_well_formed(desc.payload()) => {
                desc.payload_mut()[0] = service_type;
            }
            _ => self.store_service_payload(&build_payload(service_type, &[], &[])),
        }
    }
}

impl Sdt {
    /// First service, in service_id order, whose name matches `name`.
    ///
    /// Without `exact_match`, case and blanks are ignored.
    pub fn find_service(&self, name: &str, exact_match: bool) -> Option<u16> {
        self.services
            .iter()
            .find(|(_, service)| {
                let service_name = service.service_name();
                if exact_match {
                    service_name == name
                } else {
                    similar_strings(&service_name, name)
                }
            })
            .map(|(&id, _)| id)
    }
}
