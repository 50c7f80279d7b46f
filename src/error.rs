use std::{io, path::PathBuf};

use crate::constants::{CONFIGURE_HINT, LOGIN_HINT};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No cached credentials. {}", LOGIN_HINT)]
    NoLogin,

    #[error("Cached credentials have expired. {}", LOGIN_HINT)]
    Expired,

    #[error("No {} in {} - {}", .key, .path.display(), CONFIGURE_HINT)]
    MissingField { key: &'static str, path: PathBuf },

    #[error("SSO endpoint rejected the access token: {}. {}", .0, LOGIN_HINT)]
    Auth(String),

    #[error("SSO endpoint returned an error: {0}")]
    Service(String),

    #[error("Could not reach SSO endpoint: {0}")]
    Transport(String),

    #[error("Reading/writing {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed config at {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map a rust-ini load failure onto the I/O or parse variant.
    pub(crate) fn ini(path: impl Into<PathBuf>, err: ini::Error) -> Self {
        match err {
            ini::Error::Io(source) => Self::io(path, source),
            ini::Error::Parse(parse) => Self::Parse {
                path: path.into(),
                message: parse.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_single_line() {
        let errors = [
            Error::NoLogin,
            Error::Expired,
            Error::MissingField {
                key: "sso_role_name",
                path: PathBuf::from("/home/u/.aws/config"),
            },
            Error::Auth("Session token not found or invalid".to_string()),
            Error::Transport("timeout".to_string()),
            Error::io("/home/u/.aws/credentials", io::Error::other("disk full")),
        ];

        for err in &errors {
            assert!(!err.to_string().contains('\n'), "{err}");
        }
    }

    #[test]
    fn test_login_hint_in_expiry_messages() {
        assert!(Error::NoLogin.to_string().contains("aws sso login"));
        assert!(Error::Expired.to_string().contains("expired"));
    }

    #[test]
    fn test_missing_field_names_key_and_path() {
        let err = Error::MissingField {
            key: "sso_account_id",
            path: PathBuf::from("/tmp/config"),
        };
        let message = err.to_string();
        assert!(message.contains("sso_account_id"));
        assert!(message.contains("/tmp/config"));
        assert!(message.contains("aws configure sso"));
    }

    #[test]
    fn test_ini_io_error_maps_to_io() {
        let err = Error::ini(
            "/tmp/credentials",
            ini::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert!(matches!(err, Error::Io { .. }));
    }
}
