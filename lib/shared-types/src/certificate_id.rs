use serde::{Deserialize, Serialize};

use crate::macros::impls_for_string_newtype;

/// Opaque identifier assigned to a certificate by App Store Connect
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CertificateId(String);

impls_for_string_newtype!(CertificateId);
