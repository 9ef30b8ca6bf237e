//! Shared utility functions for ladle-server

/// Minimum accepted password length for registration and profile updates
pub const MIN_PASSWORD_LEN: usize = 5;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generate an opaque bearer token: 32 random bytes, hex-encoded
pub fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Normalize an email address: the domain part is lowercased, the local
/// part is preserved as given. Uniqueness is checked against the
/// normalized form, so addresses differing only in domain case collide.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate an email address: must contain `@` with a non-empty local
/// part and a domain containing at least one `.`
pub fn validate_email(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("pass123").unwrap();
        assert_ne!(hash, "pass123");
        assert!(verify_password("pass123", &hash));
        assert!(!verify_password("wrong_pass123", &hash));
    }

    #[test]
    fn test_verify_password_bad_hash() {
        assert!(!verify_password("pass123", "not-a-phc-string"));
    }

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        let samples = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
        ];
        for (input, expected) in samples {
            assert_eq!(normalize_email(input), expected);
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("sda@a.com"));
        assert!(validate_email("user.name@sub.example.com"));
        assert!(!validate_email(""));
        assert!(!validate_email("sda"));
        assert!(!validate_email("sda@a"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@.com"));
        assert!(!validate_email("user@example."));
    }
}
