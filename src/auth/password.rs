use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

use crate::AppResult;

pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(hashed.to_string())
}

pub fn verify(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{hash, verify};

    #[test]
    fn verify_accepts_the_original_password() {
        let stored = hash("hunter2hunter2").unwrap();
        assert!(verify("hunter2hunter2", &stored));
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let stored = hash("hunter2hunter2").unwrap();
        assert!(!verify("hunter3hunter3", &stored));
    }

    #[test]
    fn verify_rejects_garbage_stored_hashes() {
        assert!(!verify("whatever", "not-a-phc-string"));
    }
}
