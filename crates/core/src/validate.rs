//! Request-payload validation rules.
//!
//! Validation failures carry a message naming the offending field or rule so
//! the HTTP layer can surface them verbatim.

use crate::error::{DomainError, DomainResult};

/// A required field: present and non-blank after trimming.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> DomainResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!(
            "The field '{field}' is required"
        ))),
    }
}

/// A field submitted in a patch may not be blanked out.
pub fn non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "The field '{field}' must not be empty"
        )));
    }
    Ok(())
}

/// Syntactic email check: `local@domain` with a dot-separated domain.
pub fn email(value: &str) -> DomainResult<()> {
    let invalid = || DomainError::validation("The email is not valid".to_string());

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}
