use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use itertools::Itertools;
use x509_parser::der_parser::Oid;
use x509_parser::prelude::{
    AuthorityInfoAccess, FromDer, GeneralName, KeyUsage, ParsedExtension, SubjectAlternativeName,
    X509Certificate,
};

const CA_ISSUERS_ACCESS_METHOD: &str = "1.3.6.1.5.5.7.48.2";
const OCSP_ACCESS_METHOD: &str = "1.3.6.1.5.5.7.48.1";

pub(super) fn extract(certificate: &X509Certificate) -> BTreeMap<String, String> {
    let mut extensions = BTreeMap::new();

    for extension in certificate.extensions() {
        let oid = extension.oid.to_id_string();
        let key = extension_name(&oid).map(str::to_string).unwrap_or(oid);
        extensions.insert(key, hex::encode(extension.value));

        match extension.parsed_extension() {
            ParsedExtension::KeyUsage(key_usage) if key_usage.flags != 0 => {
                extensions.insert("keyUsage_parsed".to_string(), parse_key_usage(key_usage));
            }
            ParsedExtension::ExtendedKeyUsage(_) => {
                let purposes = parse_extended_key_usage(extension.value);
                if !purposes.is_empty() {
                    extensions.insert("extKeyUsage_parsed".to_string(), purposes);
                }
            }
            ParsedExtension::SubjectAlternativeName(san) => {
                let names = parse_subject_alternative_name(san);
                if !names.is_empty() {
                    extensions.insert("subjectAltName_parsed".to_string(), names);
                }
            }
            ParsedExtension::AuthorityInfoAccess(info_access) => {
                let ca_issuers = access_locations(info_access, CA_ISSUERS_ACCESS_METHOD);
                if !ca_issuers.is_empty() {
                    extensions.insert(
                        "authorityInfoAccess_caIssuers".to_string(),
                        ca_issuers.join(","),
                    );
                }
                let ocsp = access_locations(info_access, OCSP_ACCESS_METHOD);
                if !ocsp.is_empty() {
                    extensions.insert("authorityInfoAccess_ocsp".to_string(), ocsp.join(","));
                }
            }
            _ => {}
        }
    }

    extensions
}

pub(super) fn ca_issuers(certificate: &X509Certificate) -> Vec<String> {
    certificate
        .extensions()
        .iter()
        .filter_map(|extension| match extension.parsed_extension() {
            ParsedExtension::AuthorityInfoAccess(info_access) => {
                Some(access_locations(info_access, CA_ISSUERS_ACCESS_METHOD))
            }
            _ => None,
        })
        .flatten()
        .collect()
}

fn extension_name(oid: &str) -> Option<&'static str> {
    Some(match oid {
        "2.5.29.15" => "keyUsage",
        "2.5.29.37" => "extKeyUsage",
        "2.5.29.17" => "subjectAltName",
        "2.5.29.18" => "issuerAltName",
        "2.5.29.19" => "basicConstraints",
        "2.5.29.14" => "subjectKeyIdentifier",
        "2.5.29.35" => "authorityKeyIdentifier",
        "2.5.29.31" => "cRLDistributionPoints",
        "2.5.29.32" => "certificatePolicies",
        "1.3.6.1.5.5.7.1.1" => "authorityInfoAccess",
        "1.3.6.1.5.5.7.1.11" => "subjectInfoAccess",
        "2.5.29.54" => "inhibitAnyPolicy",
        "2.5.29.46" => "freshestCRL",
        "2.5.29.36" => "policyConstraints",
        "2.5.29.30" => "nameConstraints",
        "2.5.29.33" => "policyMappings",
        "1.3.6.1.4.1.11129.2.4.2" => "certificateTransparency",
        _ => return None,
    })
}

fn parse_key_usage(key_usage: &KeyUsage) -> String {
    [
        (key_usage.digital_signature(), "Digital Signature"),
        (key_usage.non_repudiation(), "Content Commitment"),
        (key_usage.key_encipherment(), "Key Encipherment"),
        (key_usage.data_encipherment(), "Data Encipherment"),
        (key_usage.key_agreement(), "Key Agreement"),
        (key_usage.key_cert_sign(), "Certificate Sign"),
        (key_usage.crl_sign(), "CRL Sign"),
        (key_usage.encipher_only(), "Encipher Only"),
        (key_usage.decipher_only(), "Decipher Only"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .join(", ")
}

/// Re-reads the raw OID sequence since the parsed form does not keep declaration order
fn parse_extended_key_usage(der: &[u8]) -> String {
    let Ok((_, purposes)) = <Vec<Oid>>::from_der(der) else {
        return String::new();
    };

    purposes
        .iter()
        .map(|oid| {
            let oid = oid.to_id_string();
            extended_key_usage_label(&oid)
                .map(str::to_string)
                .unwrap_or(oid)
        })
        .join(", ")
}

fn extended_key_usage_label(oid: &str) -> Option<&'static str> {
    Some(match oid {
        "2.5.29.37.0" => "Any",
        "1.3.6.1.5.5.7.3.1" => "Server Authentication",
        "1.3.6.1.5.5.7.3.2" => "Client Authentication",
        "1.3.6.1.5.5.7.3.3" => "Code Signing",
        "1.3.6.1.5.5.7.3.4" => "Email Protection",
        "1.3.6.1.5.5.7.3.5" => "IPSEC End System",
        "1.3.6.1.5.5.7.3.6" => "IPSEC Tunnel",
        "1.3.6.1.5.5.7.3.7" => "IPSEC User",
        "1.3.6.1.5.5.7.3.8" => "Time Stamping",
        "1.3.6.1.5.5.7.3.9" => "OCSP Signing",
        "1.3.6.1.4.1.311.10.3.3" => "Microsoft Server Gated Crypto",
        "2.16.840.1.113730.4.1" => "Netscape Server Gated Crypto",
        "1.3.6.1.4.1.311.2.1.22" => "Microsoft Commercial Code Signing",
        "1.3.6.1.4.1.311.61.1.1" => "Microsoft Kernel Code Signing",
        _ => return None,
    })
}

/// DNS names first, then IP addresses, emails and URIs
fn parse_subject_alternative_name(san: &SubjectAlternativeName) -> String {
    let names = &san.general_names;

    let dns = names.iter().filter_map(|name| match name {
        GeneralName::DNSName(dns) => Some(format!("DNS:{dns}")),
        _ => None,
    });
    let ips = names.iter().filter_map(|name| match name {
        GeneralName::IPAddress(ip) => Some(format!("IP:{}", format_ip(ip))),
        _ => None,
    });
    let emails = names.iter().filter_map(|name| match name {
        GeneralName::RFC822Name(email) => Some(format!("email:{email}")),
        _ => None,
    });
    let uris = names.iter().filter_map(|name| match name {
        GeneralName::URI(uri) => Some(format!("URI:{uri}")),
        _ => None,
    });

    dns.chain(ips).chain(emails).chain(uris).join(",")
}

fn format_ip(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        IpAddr::V4(Ipv4Addr::from(octets)).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        IpAddr::V6(Ipv6Addr::from(octets)).to_string()
    } else {
        hex::encode(bytes)
    }
}

fn access_locations(info_access: &AuthorityInfoAccess, method: &str) -> Vec<String> {
    info_access
        .accessdescs
        .iter()
        .filter(|description| description.access_method.to_id_string() == method)
        .filter_map(|description| match &description.access_location {
            GeneralName::URI(uri) => Some(uri.to_string()),
            _ => None,
        })
        .collect()
}
