use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> String {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

/// A malformed digest verifies as false; this never errors back to a caller.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let digest = hash_password("hunter2");
        assert!(verify_password("hunter2", &digest));
        assert!(!verify_password("hunter3", &digest));
    }

    #[test]
    fn digests_are_salted() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn malformed_digest_verifies_false() {
        assert!(!verify_password("hunter2", ""));
        assert!(!verify_password("hunter2", "not-a-phc-digest"));
        assert!(!verify_password("hunter2", "$argon2id$garbage"));
    }
}
