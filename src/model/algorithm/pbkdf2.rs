use pbkdf2::Pbkdf2;
use pbkdf2::password_hash::{PasswordHash, PasswordVerifier};
use crate::utils::errors::WardenError;

///
/// Verify against a pbkdf2-sha256 PHC string - kept so history entries imported
/// from pbkdf2-era systems still verify.
///
pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    let parsed_hash = PasswordHash::new(&phc)?;
    Ok(Pbkdf2.verify_password(plain_text_password.as_bytes(), &parsed_hash).is_ok())
}
