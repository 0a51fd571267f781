//! errors raised when addresses are constructed programmatically
//!
//! Parsing never produces these, see [crate::diagnostics] for parse failures.
use hcl::Identifier;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("invalid identifier {0:?}: must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidIdentifier(String),
}

/// Checks `name` against `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn identifier(name: &str) -> Result<Identifier, AddressError> {
    if !is_identifier(name) {
        return Err(AddressError::InvalidIdentifier(name.to_string()));
    }

    Ok(Identifier::unchecked(name))
}
