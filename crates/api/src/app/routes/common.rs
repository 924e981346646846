use crate::app::errors::ApiError;

/// Parse a path-captured identity, 400 on garbage.
pub fn parse_id(entity: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid {entity} id")))
}
