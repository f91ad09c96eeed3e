use serde::{Deserialize, Serialize};
use shared_types::PassTypeIdentifier;
use time::OffsetDateTime;

use crate::mapper::timestamp;

#[derive(Clone, Debug)]
pub struct CreatePassTypeIdRequestDTO {
    pub identifier: PassTypeIdentifier,
    /// Free-form description shown in the developer portal
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct PassTypeResourceDTO {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: PassTypeAttributesDTO,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PassTypeAttributesDTO {
    pub identifier: Option<String>,
    #[serde(alias = "description")]
    pub name: Option<String>,
    #[serde(deserialize_with = "timestamp::remote_option::deserialize")]
    pub created_date: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePassTypeResourceDTO<'a> {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub attributes: CreatePassTypeAttributesDTO<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePassTypeAttributesDTO<'a> {
    pub identifier: &'a str,
    pub name: &'a str,
}
