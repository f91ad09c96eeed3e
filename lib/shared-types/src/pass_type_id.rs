use serde::{Deserialize, Serialize};

use crate::macros::impls_for_string_newtype;

/// Opaque identifier assigned to a pass type ID resource by App Store Connect
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PassTypeId(String);

impls_for_string_newtype!(PassTypeId);

/// Reverse-DNS pass type identifier, e.g. `pass.com.example.membership`
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PassTypeIdentifier(String);

impls_for_string_newtype!(PassTypeIdentifier);
