use std::sync::LazyLock;

use regex::Regex;
use shared_types::PassTypeIdentifier;

use crate::service::error::ValidationError;

static PASS_TYPE_IDENTIFIER: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^pass\.([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)+(\.([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?))+$",
    )
});

/// Reverse-DNS starting with `pass.`, e.g. `pass.com.example.membership`
pub(crate) fn validate_pass_type_identifier(
    identifier: &PassTypeIdentifier,
) -> Result<(), ValidationError> {
    let valid = match &*PASS_TYPE_IDENTIFIER {
        Ok(regex) => regex.is_match(identifier.as_str()),
        Err(_) => false,
    };

    if !valid {
        return Err(ValidationError::InvalidPassTypeIdentifier(
            identifier.to_string(),
        ));
    }

    Ok(())
}
