//! Shared-password check for the console.

use crate::errors::FolioError;
use folio_core_types::Sensitive;

/// Accept `given` only when a password is configured and it matches.
///
/// An empty configured password locks the console.
///
/// # Errors
///
/// `IncorrectPassword` on any mismatch.
pub fn verify_password(expected: &Sensitive<String>, given: &str) -> Result<(), FolioError> {
    let expected = expected.expose();
    if !expected.is_empty() && expected == given {
        Ok(())
    } else {
        Err(FolioError::IncorrectPassword)
    }
}
