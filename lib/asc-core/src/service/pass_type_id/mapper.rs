use serde_json::Value;

use super::dto::{
    CreatePassTypeAttributesDTO, CreatePassTypeIdRequestDTO, CreatePassTypeResourceDTO,
    PassTypeResourceDTO,
};
use crate::model::pass_type::PassType;
use crate::service::certificate::dto::PASS_TYPE_IDS_RESOURCE_TYPE;
use crate::service::error::ServiceError;

pub(super) fn pass_type_from_resource(
    resource: PassTypeResourceDTO,
    entity: &'static str,
) -> Result<PassType, ServiceError> {
    if resource.id.is_empty() {
        return Err(ServiceError::MissingResponseId(entity));
    }

    Ok(PassType {
        id: resource.id.into(),
        identifier: resource
            .attributes
            .identifier
            .ok_or_else(|| ServiceError::MappingError("pass type ID without identifier".into()))?
            .into(),
        name: resource.attributes.name.unwrap_or_default(),
        created_date: resource.attributes.created_date,
    })
}

pub(super) fn create_request_body(
    request: &CreatePassTypeIdRequestDTO,
) -> Result<Value, ServiceError> {
    serde_json::to_value(CreatePassTypeResourceDTO {
        r#type: PASS_TYPE_IDS_RESOURCE_TYPE,
        attributes: CreatePassTypeAttributesDTO {
            identifier: request.identifier.as_str(),
            name: &request.description,
        },
    })
    .map_err(|e| ServiceError::MappingError(e.to_string()))
}
