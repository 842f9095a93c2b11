/// Password hashing using Argon2id
///
/// Credentials are hashed with Argon2id (memory-hard, deliberately slow) and
/// stored in PHC string format. Verification never recovers the plaintext
/// and never fails loudly: a malformed stored digest simply does not verify.
///
/// # Parameters
///
/// - Memory: 64 MB (65536 KB)
/// - Iterations: 3 passes
/// - Parallelism: 4 lanes
/// - Output: 32-byte hash, 16-byte random salt
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret1")?;
/// assert!(verify_password("secret1", &hash));
/// assert!(!verify_password("wrongpass", &hash));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to produce a hash
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Hashes a plaintext password with Argon2id
///
/// Returns a PHC string (`$argon2id$v=19$m=65536,t=3,p=4$...`) embedding the
/// algorithm, parameters, and salt, so verification needs no extra state.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if hashing fails. This is a server
/// fault, not a user error.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::Hash(format!("invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(format!("hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a candidate password against a stored digest
///
/// Comparison is constant-time (provided by the argon2 crate). Any failure
/// to parse or verify the stored digest, including a digest that is not a
/// PHC string at all, yields `false` rather than an error, so a corrupted
/// credential row behaves like a wrong password.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_with_expected_parameters() {
        let hash = hash_password("test_password_123").expect("hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("correct_password").unwrap();
        assert!(verify_password("correct_password", &hash));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("correct_password").unwrap();
        assert!(!verify_password("wrong_password", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        assert!(!verify_password("password", "not-a-phc-string"));
        assert!(!verify_password("password", "$argon2id$broken"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_roundtrip_unusual_passwords() {
        for password in ["with spaces", "sp&cial!@#", "unicode-密码"] {
            let hash = hash_password(password).unwrap();
            assert!(verify_password(password, &hash), "password {:?}", password);
        }
    }
}
