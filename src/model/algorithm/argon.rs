use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use password_hash::{PasswordHasher, Salt, SaltString};
use crate::utils::errors::WardenError;

///
/// The profile used to hash new credentials.
///
/// Verification reads its parameters back from the PHC string, so changing the
/// profile never invalidates stored hashes.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArgonPolicy {
    pub parallelism: u32,
    pub tag_length: u32,
    pub memory_size_kb: u32,
    pub iterations: u32,
}

impl Default for ArgonPolicy {
    fn default() -> Self {
        ArgonPolicy {
            parallelism: 1,
            tag_length: 32,
            memory_size_kb: 1024 * 16,
            iterations: 1,
        }
    }
}

impl ArgonPolicy {
    ///
    /// Hash the password and build a PHC string ($argon2id$v=19$...).
    ///
    /// ref: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md
    ///
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, WardenError> {
        let salt = SaltString::generate(&mut OsRng);
        let salt = Salt::new(salt.as_str())?;

        let params = argon2::Params::new(
            self.memory_size_kb,
            self.iterations,
            self.parallelism,
            Some(self.tag_length as usize))?;

        Ok(argon2::Argon2::default()
            .hash_password_customized(plain_text_password.as_bytes(), None, None, params, salt)?
            .to_string())
    }
}

pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    let parsed_hash = password_hash::PasswordHash::new(&phc)?;
    match argon2::PasswordVerifier::verify_password(&argon2::Argon2::default(), plain_text_password.as_bytes(), &parsed_hash) {
        Ok(_)  => Ok(true),
        Err(_) => Ok(false),
    }
}
