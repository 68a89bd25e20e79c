//! Shared utility functions: password hashing, SQL timestamps, prices

/// Current UTC time in the SQLite CURRENT_TIMESTAMP format
pub fn sql_now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC calendar date (YYYY-MM-DD)
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

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

/// Convert a decimal euro amount to integer cents (rounded)
pub fn euros_to_cents(euros: f64) -> i64 {
    (euros * 100.0).round() as i64
}

/// Convert integer cents back to a decimal euro amount
pub fn cents_to_euros(cents: i64) -> f64 {
    cents as f64 / 100.0
}
