//! Input validation utilities

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Validate username: 3 to 32 characters, letters, digits, `-`, or `_`
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 7 {
        return Err("Password must be at least 7 characters long".to_string());
    }

    if password.len() > 100 {
        return Err("Password must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate a rating value on the 0 to 5 scale
pub fn validate_rating(name: &str, rating: i32) -> Result<(), String> {
    if !(0..=5).contains(&rating) {
        return Err(format!("{name} must be between 0 and 5"));
    }

    Ok(())
}

/// Validate a cleaning job price
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price <= Decimal::ZERO {
        return Err("Price must be greater than zero".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_allow_hyphens_and_underscores() {
        assert!(validate_username("brad-pitt_99").is_ok());
        assert!(validate_username("bob").is_ok());
    }

    #[test]
    fn short_or_odd_usernames_are_rejected() {
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("éclair").is_err());
    }

    #[test]
    fn email_format_is_checked() {
        assert!(validate_email("cleaner@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn password_length_is_checked() {
        assert!(validate_password("seven77").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(101)).is_err());
    }

    #[test]
    fn ratings_stay_on_the_scale() {
        assert!(validate_rating("overall_rating", 0).is_ok());
        assert!(validate_rating("overall_rating", 5).is_ok());
        assert!(validate_rating("overall_rating", 6).is_err());
        assert!(validate_rating("overall_rating", -1).is_err());
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price(Decimal::new(1000, 2)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::new(-500, 2)).is_err());
    }
}
