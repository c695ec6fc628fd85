// Descriptor and descriptor-loop behavior:
//
// * strict single-descriptor construction and parsing
// * lookup (first match only)
// * incremental emission bounded by a capacity
// * tolerant loop parsing
// * extended_event numbering normalization
// * registry names

#[cfg(test)]
mod tests {
    use sdt_core::constants::descriptor_ids::{DID_EXTENDED_EVENT, DID_SERVICE, DID_SHORT_EVENT, DID_TRANSPORT_PROFILE};
    use sdt_core::descriptors::{registry, Descriptor, DescriptorError, DescriptorList, Emitted};

    fn desc(tag: u8, payload: &[u8]) -> Descriptor {
        Descriptor::new(tag, payload.to_vec()).unwrap()
    }

    fn extended_event(lang: &[u8; 3]) -> Descriptor {
        // number, lang(3), items length 0, text length 0
        desc(DID_EXTENDED_EVENT, &[0xFF, lang[0], lang[1], lang[2], 0, 0])
    }

// # 1. Single descriptor

    #[test]
    fn descriptor_binary_size_includes_header() {
        let d = desc(0x48, &[1, 2, 3]);
        assert_eq!(d.binary_size(), 5);
        assert_eq!(d.to_bytes(), vec![0x48, 3, 1, 2, 3]);
    }

    #[test]
    fn descriptor_rejects_oversized_payload() {
        let err = Descriptor::new(0x48, vec![0u8; 256]).unwrap_err();
        assert_eq!(err, DescriptorError::PayloadTooLarge { have: 256 });

        // the largest legal payload is accepted
        assert_eq!(Descriptor::new(0x48, vec![0u8; 255]).unwrap().binary_size(), 257);
    }

    #[test]
    fn descriptor_strict_parse() {
        let d = Descriptor::from_bytes(&[0x4D, 2, 0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(d.tag(), 0x4D);
        assert_eq!(d.payload(), &[0xAA, 0xBB]);

        assert_eq!(
            Descriptor::from_bytes(&[0x4D, 4, 0xAA]).unwrap_err(),
            DescriptorError::Truncated { have: 3, need: 6 }
        );
        assert!(matches!(Descriptor::from_bytes(&[0x4D]), Err(DescriptorError::Truncated { .. })));
    }

    #[test]
    fn descriptor_equality_is_content() {
        assert_eq!(desc(1, &[1, 2]), desc(1, &[1, 2]));
        assert_ne!(desc(1, &[1, 2]), desc(2, &[1, 2]));
        assert_ne!(desc(1, &[1, 2]), desc(1, &[1]));
    }

// # 2. Lookup

    #[test]
    fn find_returns_first_match_only() {
        let list: DescriptorList = [desc(1, &[]), desc(DID_SERVICE, &[1]), desc(DID_SERVICE, &[2])]
            .into_iter()
            .collect();

        assert_eq!(list.find(DID_SERVICE), Some(1));
        assert_eq!(list.search(DID_SERVICE, 2), Some(2));
        assert_eq!(list.search(DID_SERVICE, 3), None);
        assert_eq!(list.find(0x99), None);
    }

    #[test]
    fn binary_size_is_sum_of_members() {
        let list: DescriptorList = [desc(1, &[0; 10]), desc(2, &[]), desc(3, &[0; 255])].into_iter().collect();
        assert_eq!(list.binary_size(), 12 + 2 + 257);
        assert_eq!(list.to_bytes().len(), list.binary_size());
        assert_eq!(DescriptorList::new().binary_size(), 0);
    }

// # 3. Incremental emission

    #[test]
    fn emit_everything_when_capacity_allows() {
        let list: DescriptorList = [desc(1, &[0; 3]), desc(2, &[0; 3])].into_iter().collect();
        let mut out = Vec::new();

        let emitted = list.emit_prefix(&mut out, 10, 0);

        assert_eq!(emitted, Emitted { bytes_written: 10, next_index: 2 });
        assert_eq!(out, list.to_bytes());
    }

    #[test]
    fn emit_never_writes_partial_descriptor() {
        let list: DescriptorList = [desc(1, &[0; 3]), desc(2, &[0; 3])].into_iter().collect();
        let mut out = vec![0xEE];

        let emitted = list.emit_prefix(&mut out, 9, 0);

        assert_eq!(emitted, Emitted { bytes_written: 5, next_index: 1 });
        // existing content is preserved, only whole descriptors appended
        assert_eq!(out, vec![0xEE, 1, 3, 0, 0, 0]);
    }

    #[test]
    fn emit_with_zero_capacity_writes_nothing() {
        let list: DescriptorList = [desc(1, &[])].into_iter().collect();
        let mut out = Vec::new();

        assert_eq!(list.emit_prefix(&mut out, 0, 0), Emitted { bytes_written: 0, next_index: 0 });
        assert!(out.is_empty());
    }

    #[test]
    fn emit_from_end_is_noop() {
        let list: DescriptorList = [desc(1, &[])].into_iter().collect();
        let mut out = Vec::new();

        assert_eq!(list.emit_prefix(&mut out, 100, 1), Emitted { bytes_written: 0, next_index: 1 });
    }

// # 4. Tolerant parsing

    #[test]
    fn parse_well_formed_loop() {
        let wire = [0x48, 1, 0x01, 0x4D, 0];
        let list = DescriptorList::from_bytes(&wire);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], desc(0x48, &[1]));
        assert_eq!(list[1], desc(0x4D, &[]));
        assert_eq!(list.to_bytes(), wire.to_vec());
    }

    #[test]
    fn parse_truncates_overrunning_descriptor() {
        let mut list = DescriptorList::new();
        let consumed = list.parse_append(&[DID_SHORT_EVENT, 10, 1, 2, 3]);

        assert_eq!(consumed, 5);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].payload(), &[1, 2, 3]);
        assert_eq!(list.binary_size(), 5);
    }

    #[test]
    fn parse_appends_to_existing_content() {
        let mut list: DescriptorList = [desc(1, &[9])].into_iter().collect();
        list.parse_append(&[2, 0]);

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].tag(), 2);
    }

// # 5. Extended event numbering

    #[test]
    fn normalize_numbers_per_language() {
        let mut list: DescriptorList = [
            extended_event(b"fra"),
            desc(DID_SHORT_EVENT, &[0; 5]),
            extended_event(b"eng"),
            extended_event(b"fra"),
            extended_event(b"fra"),
        ]
        .into_iter()
        .collect();

        list.normalize_extended_event_numbering();

        assert_eq!(list[0].payload()[0], 0x02); // fra 0 of 2
        assert_eq!(list[1].payload()[0], 0x00); // untouched
        assert_eq!(list[2].payload()[0], 0x00); // eng 0 of 0
        assert_eq!(list[3].payload()[0], 0x12); // fra 1 of 2
        assert_eq!(list[4].payload()[0], 0x22); // fra 2 of 2
    }

    #[test]
    fn normalize_skips_short_extended_event() {
        let mut list: DescriptorList = [desc(DID_EXTENDED_EVENT, &[0xFF, b'f', b'r'])].into_iter().collect();
        list.normalize_extended_event_numbering();
        assert_eq!(list[0].payload(), &[0xFF, b'f', b'r']);
    }

// # 6. Registry

    #[test]
    fn registry_names() {
        let info = registry::resolve(DID_SERVICE).unwrap();
        assert_eq!(info.xml_name, "service_descriptor");
        assert_eq!(registry::resolve_xml_name("SERVICE_DESCRIPTOR").unwrap().tag, DID_SERVICE);

        assert!(registry::resolve(0xE0).is_none());
        assert_eq!(registry::name_or_hex(0xE0), "0xE0");
        assert_eq!(registry::xml_name(0xE0), registry::GENERIC_XML_NAME);
    }

    #[test]
    fn registry_knows_transport_profile() {
        assert_eq!(DID_TRANSPORT_PROFILE, 0x37);
        assert_eq!(registry::xml_name(0x37), "transport_profile_descriptor");
        assert_eq!(registry::name_or_hex(0x37), "Transport Profile");
        assert_eq!(registry::resolve_xml_name("transport_profile_descriptor").unwrap().tag, 0x37);
    }
}
