use crate::utils::errors::WardenError;

///
/// Verify against a bcrypt hash ($2a$/$2b$/$2x$/$2y$) - kept so history entries
/// imported from bcrypt-era systems still verify.
///
pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    bcrypt::verify(plain_text_password, phc).map_err(|e| WardenError::from(e))
}
