//! Session and credential types

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shortest username the server accepts
pub const MIN_USERNAME_LEN: usize = 3;

/// Shortest password the server accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// The authenticated user, as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

/// Whether an authentication attempt creates an account or signs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Login/register input pair, in the shape the server expects
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials, applying the same pre-checks the server enforces.
    ///
    /// Constraint failures never reach the network.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return Err(Error::validation("Please fill in all fields"));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(Error::validation(format!(
                "Username must be at least {} characters long",
                MIN_USERNAME_LEN
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_credentials() {
        let credentials = Credentials::new("bob12", "secret1").unwrap();
        assert_eq!(credentials.username, "bob12");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let credentials = Credentials::new("  bob12  ", " secret1 ").unwrap();
        assert_eq!(credentials.username, "bob12");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn test_rejects_empty_fields() {
        assert!(Credentials::new("", "secret1").is_err());
        assert!(Credentials::new("bob12", "   ").is_err());
    }

    #[test]
    fn test_rejects_short_username() {
        let result = Credentials::new("ab", "secret1");
        match result.unwrap_err() {
            Error::Validation(msg) => assert!(msg.contains("Username")),
            e => panic!("Expected Validation error, got: {:?}", e),
        }
    }

    #[test]
    fn test_rejects_short_password() {
        let result = Credentials::new("bob12", "12345");
        match result.unwrap_err() {
            Error::Validation(msg) => assert!(msg.contains("Password")),
            e => panic!("Expected Validation error, got: {:?}", e),
        }
    }
}
