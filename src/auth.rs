//! Librarian login check. The UI only asks a [`CredentialVerifier`] whether a
//! username/password pair is acceptable, so the policy can be swapped without
//! touching the screens.

use subtle::ConstantTimeEq;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "pass123";

pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single configured username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_is_accepted() {
        assert!(StaticCredentials::default().verify("admin", "pass123"));
    }

    #[test]
    fn anything_else_is_rejected() {
        let credentials = StaticCredentials::default();
        assert!(!credentials.verify("admin", "pass1234"));
        assert!(!credentials.verify("Admin", "pass123"));
        assert!(!credentials.verify("", ""));
    }

    #[test]
    fn configured_pair_replaces_the_default() {
        let credentials = StaticCredentials::new("librarian", "shelves");
        assert!(credentials.verify("librarian", "shelves"));
        assert!(!credentials.verify("admin", "pass123"));
    }
}
