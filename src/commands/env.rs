use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;

use crate::{
    aws::{Credentials, RoleCredentialsProvider},
    clock::Clock,
    resolver::Resolver,
};

#[derive(Debug, Clone, Args)]
pub struct EnvCommand {}

impl EnvCommand {
    pub async fn execute<C: Clock, P: RoleCredentialsProvider>(
        self,
        resolver: &Resolver<C, P>,
        out: &mut impl Write,
    ) -> Result<()> {
        let credentials = resolver.resolve().await?;
        write_exports(&credentials, out).context("Failed to write credentials to stdout")
    }
}

/// Values are base64-like and need no shell quoting.
fn write_exports(creds: &Credentials, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "export AWS_ACCESS_KEY_ID={}", creds.access_key_id)?;
    writeln!(out, "export AWS_SECRET_ACCESS_KEY={}", creds.secret_access_key)?;
    writeln!(out, "export AWS_SESSION_TOKEN={}", creds.session_token)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, resolver::testing::*};

    #[tokio::test]
    async fn test_env_prints_exports() {
        let home = home(&[("a.json", LOGIN)], CONFIG);
        let resolver = resolver(home.path(), StubProvider::returning("AK", "SK", "ST"));
        let mut out = Vec::new();

        EnvCommand {}.execute(&resolver, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "export AWS_ACCESS_KEY_ID=AK\n\
             export AWS_SECRET_ACCESS_KEY=SK\n\
             export AWS_SESSION_TOKEN=ST\n"
        );
    }

    #[tokio::test]
    async fn test_env_prints_nothing_on_error() {
        let home = home(&[], CONFIG);
        let resolver = resolver(home.path(), StubProvider::returning("AK", "SK", "ST"));
        let mut out = Vec::new();

        let err = EnvCommand {}
            .execute(&resolver, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoLogin)));
        assert!(out.is_empty());
    }
}
