use std::path::{Path, PathBuf};

use crate::{
    constants::{
        AWS_CONFIG_DIR_NAME, AWS_CONFIG_FILE_NAME, AWS_CREDENTIALS_FILE_NAME, SSO_CACHE_DIR,
    },
    error::{Error, Result},
};

/// Locations of the three per-user AWS files ssocred touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsPaths {
    pub config: PathBuf,
    pub credentials: PathBuf,
    pub sso_cache: PathBuf,
}

impl AwsPaths {
    /// Resolve paths under the current user's home directory
    pub fn discover() -> Result<Self> {
        dirs::home_dir()
            .map(|home| Self::from_home(&home))
            .ok_or(Error::NoHomeDir)
    }

    pub fn from_home(home: &Path) -> Self {
        let aws_dir = home.join(AWS_CONFIG_DIR_NAME);
        let sso_cache = SSO_CACHE_DIR
            .iter()
            .fold(aws_dir.clone(), |dir, part| dir.join(part));

        Self {
            config: aws_dir.join(AWS_CONFIG_FILE_NAME),
            credentials: aws_dir.join(AWS_CREDENTIALS_FILE_NAME),
            sso_cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_home() {
        let paths = AwsPaths::from_home(Path::new("/home/alice"));

        assert_eq!(paths.config, PathBuf::from("/home/alice/.aws/config"));
        assert_eq!(
            paths.credentials,
            PathBuf::from("/home/alice/.aws/credentials")
        );
        assert_eq!(paths.sso_cache, PathBuf::from("/home/alice/.aws/sso/cache"));
    }

    #[test]
    fn test_discover_uses_aws_dir() {
        if let Ok(paths) = AwsPaths::discover() {
            assert!(paths.config.to_string_lossy().contains(AWS_CONFIG_DIR_NAME));
            assert!(paths.sso_cache.ends_with("sso/cache"));
        }
    }
}
