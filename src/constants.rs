use std::time::Duration;

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// Shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// SSO token cache location relative to the AWS configuration directory
pub const SSO_CACHE_DIR: [&str; 2] = ["sso", "cache"];

/// The only profile read from the config file and written to the credentials file
pub const DEFAULT_PROFILE: &str = "default";

/// Wall-clock limit for the GetRoleCredentials call
pub const SSO_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mode applied to the credentials file on POSIX systems
pub const CREDENTIALS_FILE_MODE: u32 = 0o600;

pub const LOGIN_HINT: &str = "Run `aws sso login` to sign in again.";

pub const CONFIGURE_HINT: &str = "run `aws configure sso` first.";

/// Config keys holding the role binding
pub const SSO_ACCOUNT_ID_KEY: &str = "sso_account_id";
pub const SSO_ROLE_NAME_KEY: &str = "sso_role_name";

/// Keys owned by ssocred in the credentials file
pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";
pub const SECURITY_TOKEN_KEY: &str = "aws_security_token";
pub const SESSION_EXPIRATION_KEY: &str = "aws_session_expiration";
