use std::str::FromStr;

use crate::{CertificateId, PassTypeId, PassTypeIdentifier};

#[test]
fn test_string_newtype_serializes_transparently() {
    let id = CertificateId::from("ABC123DEF");

    assert_eq!(serde_json::to_string(&id).unwrap(), "\"ABC123DEF\"");
    assert_eq!(
        serde_json::from_str::<CertificateId>("\"ABC123DEF\"").unwrap(),
        id
    );
}

#[test]
fn test_string_newtype_conversions() {
    let identifier = PassTypeIdentifier::from_str("pass.com.example.membership").unwrap();

    assert_eq!(identifier.as_str(), "pass.com.example.membership");
    assert_eq!(identifier.to_string(), "pass.com.example.membership");
    assert!(identifier == *"pass.com.example.membership");

    let id = PassTypeId::from("P1".to_string());
    let inner: String = id.into();
    assert_eq!(inner, "P1");
}
