use aws_config::{BehaviorVersion, Region, timeout::TimeoutConfig};
use aws_sdk_sso::{
    Client, Config,
    error::{DisplayErrorContext, SdkError},
    operation::get_role_credentials::GetRoleCredentialsError,
    types::RoleCredentials,
};
use chrono::{DateTime, Utc};
use std::{fmt::Debug, time::Duration};
use tracing::{debug, info};

use super::{CachedLogin, Credentials, RoleCredentialsProvider};
use crate::{
    config::RoleBinding,
    constants::SSO_REQUEST_TIMEOUT,
    error::{Error, Result},
};

/// GetRoleCredentials against the SSO portal in the login's region
#[derive(Debug, Clone)]
pub struct SsoClient {
    timeout: Duration,
}

impl Default for SsoClient {
    fn default() -> Self {
        Self {
            timeout: SSO_REQUEST_TIMEOUT,
        }
    }
}

impl SsoClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self, region: &str) -> Client {
        let config = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(self.timeout)
                    .build(),
            )
            .build();

        Client::from_conf(config)
    }
}

impl RoleCredentialsProvider for SsoClient {
    async fn role_credentials(
        &self,
        login: &CachedLogin,
        binding: &RoleBinding,
    ) -> Result<Credentials> {
        info!("Calling AWS SSO GetRoleCredentials");
        debug!("Region: {}", login.region);
        debug!("Account: {}", binding.account_id);
        debug!("Role: {}", binding.role_name);

        let response = self
            .client(&login.region)
            .get_role_credentials()
            .access_token(&login.access_token)
            .account_id(&binding.account_id)
            .role_name(&binding.role_name)
            .send()
            .await
            .map_err(classify)?;

        let role_credentials = response
            .role_credentials()
            .ok_or_else(|| Error::Service("response did not contain any credentials".into()))?;

        let credentials = into_credentials(role_credentials)?;
        info!("Successfully obtained AWS credentials");
        Ok(credentials)
    }
}

fn into_credentials(role_credentials: &RoleCredentials) -> Result<Credentials> {
    let field = |value: Option<&str>, name: &str| {
        value
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::Service(format!("response did not contain {name}")))
    };

    Ok(Credentials {
        access_key_id: field(role_credentials.access_key_id(), "an access key id")?,
        secret_access_key: field(
            role_credentials.secret_access_key(),
            "a secret access key",
        )?,
        session_token: field(role_credentials.session_token(), "a session token")?,
        expiration: expiration_from_millis(role_credentials.expiration()),
    })
}

/// The portal reports expiry as epoch milliseconds; zero means it was not sent.
fn expiration_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    (millis > 0)
        .then(|| DateTime::from_timestamp_millis(millis))
        .flatten()
}

/// Separate token rejection from other service errors and from transport failures.
fn classify<R: Debug + 'static>(err: SdkError<GetRoleCredentialsError, R>) -> Error {
    match err {
        SdkError::ServiceError(context) => match context.into_err() {
            GetRoleCredentialsError::UnauthorizedException(e) => Error::Auth(
                e.message()
                    .unwrap_or("access token is invalid or expired")
                    .to_string(),
            ),
            other => Error::Service(DisplayErrorContext(&other).to_string()),
        },
        other => Error::Transport(DisplayErrorContext(&other).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sso::types::error::{ResourceNotFoundException, UnauthorizedException};

    fn role_credentials(expiration: i64) -> RoleCredentials {
        RoleCredentials::builder()
            .access_key_id("AK")
            .secret_access_key("SK")
            .session_token("ST")
            .expiration(expiration)
            .build()
    }

    #[test]
    fn test_into_credentials() {
        let creds = into_credentials(&role_credentials(4_070_908_800_000)).unwrap();

        assert_eq!(creds.access_key_id, "AK");
        assert_eq!(creds.secret_access_key, "SK");
        assert_eq!(creds.session_token, "ST");
        assert_eq!(
            creds.expiration,
            DateTime::from_timestamp(4_070_908_800, 0)
        );
    }

    #[test]
    fn test_into_credentials_without_expiration() {
        let creds = into_credentials(&role_credentials(0)).unwrap();
        assert_eq!(creds.expiration, None);
    }

    #[test]
    fn test_into_credentials_missing_session_token() {
        let incomplete = RoleCredentials::builder()
            .access_key_id("AK")
            .secret_access_key("SK")
            .build();

        assert!(matches!(
            into_credentials(&incomplete),
            Err(Error::Service(_))
        ));
    }

    #[test]
    fn test_classify_unauthorized() {
        let err: SdkError<GetRoleCredentialsError, ()> = SdkError::service_error(
            GetRoleCredentialsError::UnauthorizedException(
                UnauthorizedException::builder()
                    .message("Session token not found or invalid")
                    .build(),
            ),
            (),
        );

        match classify(err) {
            Error::Auth(message) => assert_eq!(message, "Session token not found or invalid"),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_service_error() {
        let err: SdkError<GetRoleCredentialsError, ()> = SdkError::service_error(
            GetRoleCredentialsError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("No access")
                    .build(),
            ),
            (),
        );

        assert!(matches!(classify(err), Error::Service(_)));
    }

    #[test]
    fn test_classify_timeout_is_transport() {
        let err: SdkError<GetRoleCredentialsError, ()> = SdkError::timeout_error("timed out");

        assert!(matches!(classify(err), Error::Transport(_)));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(SsoClient::new().timeout, SSO_REQUEST_TIMEOUT);
    }
}
