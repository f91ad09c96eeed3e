pub mod certificate;
pub mod common_dto;
pub(crate) mod common_validator;
pub mod error;
pub mod pass_type_id;
