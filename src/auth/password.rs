use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use tracing::error;

/// Checks a candidate password against a stored argon2 PHC string. No
/// operation in scope creates users, so hashing only happens out of band
/// (seed data); this side of the scheme is all the server needs.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString};
    use rand::rngs::OsRng;

    fn hash(plain: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .expect("hashing should succeed")
            .to_string()
    }

    #[test]
    fn accepts_matching_password() {
        let stored = hash("pw123");
        assert_ne!(stored, "pw123");
        assert!(verify_password("pw123", &stored).expect("verify should succeed"));
    }

    #[test]
    fn rejects_wrong_password() {
        let stored = hash("pw123");
        assert!(!verify_password("pw124", &stored).expect("verify should not error"));
    }

    #[test]
    fn salted_hashes_differ_but_both_verify() {
        let a = hash("pw123");
        let b = hash("pw123");
        assert_ne!(a, b);
        assert!(verify_password("pw123", &a).unwrap());
        assert!(verify_password("pw123", &b).unwrap());
    }

    #[test]
    fn errors_on_malformed_hash() {
        assert!(verify_password("anything", "plaintext-left-in-column").is_err());
    }
}
