use super::error::ValidationError;

/// Remote ids end up in URL paths
pub(crate) fn validate_remote_id(id: &str, field: &'static str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::InvalidRemoteId {
            field,
            reason: "must not be empty".to_string(),
        });
    }

    if let Some(invalid) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ValidationError::InvalidRemoteId {
            field,
            reason: format!("unexpected character '{invalid}'"),
        });
    }

    Ok(())
}
