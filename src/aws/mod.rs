use std::fmt;

use chrono::{DateTime, Utc};

use crate::{config::RoleBinding, error::Result};

pub mod cache;
pub mod credentials;
pub mod sso;

pub use cache::CachedLogin;
pub use sso::SsoClient;

/// AWS temporary credentials returned by the SSO portal
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"** redacted **")
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Exchanges a cached SSO login for role credentials.
pub trait RoleCredentialsProvider {
    fn role_credentials(
        &self,
        login: &CachedLogin,
        binding: &RoleBinding,
    ) -> impl Future<Output = Result<Credentials>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials {
            access_key_id: "ASIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
            expiration: None,
        };

        let debug = format!("{creds:?}");
        assert!(!debug.contains("ASIAEXAMPLE"));
        assert!(!debug.contains("secret\""));
        assert!(!debug.contains("token\""));
        assert!(debug.contains("redacted"));
    }
}
