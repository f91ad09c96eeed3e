use serde::{Deserialize, Serialize};
use shared_types::{PassTypeId, PassTypeIdentifier};
use time::OffsetDateTime;

use crate::mapper::timestamp;

/// Owning identifier required by pass certificates
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PassType {
    pub id: PassTypeId,
    pub identifier: PassTypeIdentifier,
    /// Free-form description
    pub name: String,
    #[serde(with = "timestamp::option", default)]
    pub created_date: Option<OffsetDateTime>,
}
