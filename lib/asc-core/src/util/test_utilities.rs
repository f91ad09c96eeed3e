use ct_codecs::{Base64, Encoder};
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::extension::{
    BasicConstraints, ExtendedKeyUsage, KeyUsage, SubjectAlternativeName,
};
use openssl::x509::{X509, X509Extension, X509NameBuilder};

pub const TEST_SERIAL: u32 = 0x1A2B3C;

pub enum TestKeyType {
    Rsa,
    Ec,
}

pub struct TestCertificate {
    pub certificate: X509,
    pub private_key: PKey<Private>,
}

impl TestCertificate {
    pub fn base64_der(&self) -> String {
        Base64::encode_to_string(self.certificate.to_der().unwrap()).unwrap()
    }

    pub fn pem(&self) -> String {
        String::from_utf8(self.certificate.to_pem().unwrap()).unwrap()
    }

    /// Key in its algorithm specific container (`RSA PRIVATE KEY` / `EC PRIVATE KEY`)
    pub fn traditional_key_pem(&self) -> String {
        let pem = match self.private_key.id() {
            openssl::pkey::Id::RSA => self
                .private_key
                .rsa()
                .unwrap()
                .private_key_to_pem()
                .unwrap(),
            _ => self
                .private_key
                .ec_key()
                .unwrap()
                .private_key_to_pem()
                .unwrap(),
        };
        String::from_utf8(pem).unwrap()
    }

    pub fn pkcs8_key_pem(&self) -> String {
        String::from_utf8(self.private_key.private_key_to_pem_pkcs8().unwrap()).unwrap()
    }
}

pub fn generate_private_key(key_type: TestKeyType) -> PKey<Private> {
    match key_type {
        TestKeyType::Rsa => PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap(),
        TestKeyType::Ec => {
            let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
            PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
        }
    }
}

/// Self-signed leaf with SAN, key usage, EKU and AIA extensions, valid for `validity_days`
pub fn generate_certificate(key_type: TestKeyType, validity_days: u32) -> TestCertificate {
    let private_key = generate_private_key(key_type);

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, "pass.com.example.test")
        .unwrap();
    name.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Example Inc.")
        .unwrap();
    let name = name.build();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder
        .set_serial_number(&BigNum::from_u32(TEST_SERIAL).unwrap().to_asn1_integer().unwrap())
        .unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(validity_days).unwrap())
        .unwrap();
    builder.set_pubkey(&private_key).unwrap();

    builder
        .append_extension(BasicConstraints::new().critical().build().unwrap())
        .unwrap();
    builder
        .append_extension(
            KeyUsage::new()
                .critical()
                .digital_signature()
                .key_encipherment()
                .build()
                .unwrap(),
        )
        .unwrap();
    builder
        .append_extension(
            ExtendedKeyUsage::new()
                .server_auth()
                .client_auth()
                .build()
                .unwrap(),
        )
        .unwrap();

    let san = SubjectAlternativeName::new()
        .dns("localhost")
        .dns("test.example.com")
        .ip("127.0.0.1")
        .email("admin@example.com")
        .build(&builder.x509v3_context(None, None))
        .unwrap();
    builder.append_extension(san).unwrap();

    #[allow(deprecated)]
    let aia = X509Extension::new_nid(
        None,
        Some(&builder.x509v3_context(None, None)),
        Nid::INFO_ACCESS,
        "caIssuers;URI:http://ca.example.com/ca.cer,OCSP;URI:http://ocsp.example.com",
    )
    .unwrap();
    builder.append_extension(aia).unwrap();

    builder.sign(&private_key, MessageDigest::sha256()).unwrap();

    TestCertificate {
        certificate: builder.build(),
        private_key,
    }
}

/// Minimal certificate without any extensions
pub fn generate_bare_certificate() -> TestCertificate {
    let private_key = generate_private_key(TestKeyType::Ec);

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, "bare").unwrap();
    let name = name.build();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder
        .set_not_before(&Asn1Time::days_from_now(0).unwrap())
        .unwrap();
    builder
        .set_not_after(&Asn1Time::days_from_now(1).unwrap())
        .unwrap();
    builder.set_pubkey(&private_key).unwrap();
    builder.sign(&private_key, MessageDigest::sha256()).unwrap();

    TestCertificate {
        certificate: builder.build(),
        private_key,
    }
}
