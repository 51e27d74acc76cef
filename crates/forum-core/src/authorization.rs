//! Ownership guard for mutating post operations.

use crate::error::DomainError;

/// Allow the write only when `identity` is exactly the recorded `owner`.
///
/// Comparison is case-sensitive. Callers must pass the owner of the row as
/// it is stored, never a value taken from the request body.
pub fn ensure_owner(identity: &str, owner: &str) -> Result<(), DomainError> {
    if identity == owner {
        return Ok(());
    }

    tracing::debug!(identity, owner, "ownership check rejected");
    Err(DomainError::Forbidden(
        "post does not belong to the authenticated user".to_string(),
    ))
}
