// JSON form of an SDT.

#[cfg(test)]
mod tests {
    use sdt_core::descriptors::Descriptor;
    use sdt_core::sdt::{RunningStatus, Sdt, TableKind, TextError};
    use sdt_core::types::CodecError;

    fn sample() -> Sdt {
        let mut sdt = Sdt::new(TableKind::Other, 12, true, 0x0401, 0x20FA);
        let s = sdt.service_mut(0x0010);
        s.eit_present_following = true;
        s.set_running_status(RunningStatus::Running);
        s.set_provider("Provider", 0x01);
        s.set_name("Channel", 0x01);
        s.descs.add(Descriptor::new(0xE0, vec![0xDE, 0xAD]).unwrap());
        sdt.service_mut(0x0011).ca_controlled = true;
        sdt
    }

    #[test]
    fn json_roundtrip() {
        let sdt = sample();
        let text = sdt.to_json().unwrap();
        assert_eq!(Sdt::from_json(&text).unwrap(), sdt);
    }

    #[test]
    fn json_roundtrip_of_out_of_range_inputs() {
        let mut sdt = Sdt::new(TableKind::Actual, 40, true, 1, 2);
        sdt.service_mut(7).set_running_status(RunningStatus::from_bits(9));

        let text = sdt.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], 8);
        assert_eq!(value["services"][0]["running_status"], 1);
        assert_eq!(Sdt::from_json(&text).unwrap(), sdt);
    }

    #[test]
    fn json_names_known_descriptors() {
        let text = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["kind"], "other");
        let descs = &value["services"][0]["descriptors"];
        assert_eq!(descs[0]["name"], "service_descriptor");
        assert!(descs[1].get("name").is_none());
        assert_eq!(descs[1]["payload"], "dead");
    }

    #[test]
    fn json_minimal_document_uses_defaults() {
        let text = r#"{"kind":"actual","version":1,"ts_id":2,"onetw_id":3,"services":[{"service_id":5}]}"#;
        let sdt = Sdt::from_json(text).unwrap();

        assert!(sdt.is_valid());
        assert!(sdt.is_current);
        assert_eq!(sdt.kind, TableKind::Actual);
        assert_eq!(sdt.services[&5], Default::default());
    }

    #[test]
    fn json_rejects_bad_documents() {
        let bad_hex = r#"{"kind":"actual","version":0,"ts_id":0,"onetw_id":0,
            "services":[{"service_id":1,"descriptors":[{"tag":72,"payload":"zz"}]}]}"#;
        assert!(matches!(Sdt::from_json(bad_hex), Err(TextError::Hex { service_id: 1, .. })));

        let too_long = format!(
            r#"{{"kind":"actual","version":0,"ts_id":0,"onetw_id":0,
            "services":[{{"service_id":2,"descriptors":[{{"tag":72,"payload":"{}"}}]}}]}}"#,
            "00".repeat(256)
        );
        assert!(matches!(Sdt::from_json(&too_long), Err(TextError::Descriptor { service_id: 2, .. })));

        let version = r#"{"kind":"actual","version":32,"ts_id":0,"onetw_id":0}"#;
        assert!(matches!(Sdt::from_json(version), Err(TextError::InvalidVersion(32))));

        let status = r#"{"kind":"actual","version":0,"ts_id":0,"onetw_id":0,
            "services":[{"service_id":1,"running_status":8}]}"#;
        assert!(matches!(Sdt::from_json(status), Err(TextError::InvalidRunningStatus(8))));

        let duplicate = r#"{"kind":"actual","version":0,"ts_id":0,"onetw_id":0,
            "services":[{"service_id":1},{"service_id":1}]}"#;
        assert!(matches!(Sdt::from_json(duplicate), Err(TextError::DuplicateService(1))));

        assert!(matches!(Sdt::from_json("{"), Err(TextError::Json(_))));
    }

    #[test]
    fn invalid_table_has_no_json_form() {
        let mut sdt = sample();
        sdt.invalidate();
        assert!(matches!(sdt.to_json(), Err(TextError::InvalidTable)));
    }

    #[test]
    fn text_error_converts_to_codec_error() {
        fn load(text: &str) -> Result<Sdt, CodecError> {
            Ok(Sdt::from_json(text)?)
        }
        let err = load("[]").unwrap_err();
        assert!(matches!(err, CodecError::Text(TextError::Json(_))));
        assert!(err.to_string().starts_with("text error"));
    }
}
