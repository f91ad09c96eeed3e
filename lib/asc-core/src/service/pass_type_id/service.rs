use shared_types::{PassTypeId, PassTypeIdentifier};

use super::dto::{CreatePassTypeIdRequestDTO, PassTypeResourceDTO};
use super::mapper::{create_request_body, pass_type_from_resource};
use super::validator::validate_pass_type_identifier;
use super::{PASS_TYPE_IDS_PATH, PassTypeIdService};
use crate::model::pass_type::PassType;
use crate::proto::api_client::ApiRequest;
use crate::service::common_validator::validate_remote_id;
use crate::service::error::{
    BusinessLogicError, EntityNotFoundError, ServiceError, ValidationError,
};

impl PassTypeIdService {
    pub async fn create_pass_type_id(
        &self,
        request: CreatePassTypeIdRequestDTO,
    ) -> Result<PassType, ServiceError> {
        validate_pass_type_identifier(&request.identifier)?;

        let body = create_request_body(&request)?;
        let resource: PassTypeResourceDTO = self
            .api_client
            .execute(ApiRequest::post(PASS_TYPE_IDS_PATH, body))
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("create Pass Type ID"))?;

        let pass_type = pass_type_from_resource(resource, "created Pass Type ID")?;

        tracing::info!(
            pass_type_id = %pass_type.id,
            identifier = %pass_type.identifier,
            "Created Pass Type ID"
        );

        Ok(pass_type)
    }

    pub async fn get_pass_type_id(&self, id: &PassTypeId) -> Result<PassType, ServiceError> {
        validate_remote_id(id.as_str(), "Pass Type ID")?;

        let resource: PassTypeResourceDTO = self
            .api_client
            .execute(ApiRequest::get(format!("{PASS_TYPE_IDS_PATH}/{id}")))
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("read Pass Type ID"))?;

        pass_type_from_resource(resource, "Pass Type ID")
    }

    /// Exactly one pass type ID with the given identifier
    pub async fn find_pass_type_id(
        &self,
        identifier: &PassTypeIdentifier,
    ) -> Result<PassType, ServiceError> {
        tracing::debug!(%identifier, "Fetching Pass Type IDs with filter");

        let resources: Vec<PassTypeResourceDTO> = self
            .api_client
            .execute(
                ApiRequest::get(PASS_TYPE_IDS_PATH)
                    .query("filter[identifier]", identifier.as_str()),
            )
            .await
            .and_then(|response| response.into_data())
            .map_err(ServiceError::remote("read Pass Type IDs"))?;

        let mut matches = resources
            .into_iter()
            .map(|resource| pass_type_from_resource(resource, "Pass Type ID"))
            .filter(|result| {
                result
                    .as_ref()
                    .map_or(true, |pass_type| &pass_type.identifier == identifier)
            })
            .collect::<Result<Vec<_>, _>>()?;

        match matches.len() {
            0 => Err(EntityNotFoundError::PassType(identifier.clone()).into()),
            1 => Ok(matches.remove(0)),
            _ => Err(BusinessLogicError::AmbiguousPassTypeFilter(identifier.clone()).into()),
        }
    }

    pub async fn delete_pass_type_id(&self, id: &PassTypeId) -> Result<(), ServiceError> {
        validate_remote_id(id.as_str(), "Pass Type ID")?;

        self.api_client
            .execute(ApiRequest::delete(format!("{PASS_TYPE_IDS_PATH}/{id}")))
            .await
            .map_err(ServiceError::remote("delete Pass Type ID"))?;

        tracing::info!(pass_type_id = %id, "Deleted Pass Type ID");
        Ok(())
    }

    /// App Store Connect has no update for pass type IDs
    pub async fn update_pass_type_id(
        &self,
        _current: &PassType,
        _request: CreatePassTypeIdRequestDTO,
    ) -> Result<PassType, ServiceError> {
        Err(ValidationError::PassTypeIdUpdateNotSupported.into())
    }
}
