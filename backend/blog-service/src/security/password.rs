/// Password hashing and verification using Argon2id
use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;

const MIN_PASSWORD_LEN: usize = 8;

lazy_static! {
    /// Hash checked when no account matches, so failed logins cost the same.
    static ref DUMMY_HASH: Option<String> = {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(b"unused-dummy-password-0", &salt)
            .ok()
            .map(|hash| hash.to_string())
    };
}

/// Hash a password into a PHC string after checking its strength.
pub fn hash_password(password: &str) -> Result<String> {
    validate_password_strength(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored PHC hash. A mismatch is `Ok(false)`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Run a full verification against a throwaway hash and discard the outcome.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

fn validate_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if !password.chars().any(char::is_alphabetic) {
        return Err(AppError::Validation(
            "Password must contain at least one letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("correct horse 42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse 42", &hash).unwrap());
        assert!(!verify_password("wrong horse 42", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password("Passw0rdPassw0rd").unwrap();
        let b = hash_password("Passw0rdPassw0rd").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn weak_passwords_are_rejected() {
        for weak in ["short1", "onlyletters", "1234567890"] {
            assert!(
                matches!(hash_password(weak), Err(AppError::Validation(_))),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("someone else 42", hash).unwrap());
        verify_dummy("someone else 42");
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("whatever1", "plaintext").is_err());
    }
}
