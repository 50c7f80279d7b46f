use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::Args;
use serde::Serialize;
use std::io::Write;

use crate::{
    aws::{Credentials, RoleCredentialsProvider},
    clock::Clock,
    resolver::Resolver,
};

/// https://docs.aws.amazon.com/sdkref/latest/guide/feature-process-credentials.html
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialProcessOutput<'a> {
    version: u8,
    access_key_id: &'a str,
    secret_access_key: &'a str,
    session_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<String>,
}

impl<'a> From<&'a Credentials> for CredentialProcessOutput<'a> {
    fn from(creds: &'a Credentials) -> Self {
        Self {
            version: 1,
            access_key_id: &creds.access_key_id,
            secret_access_key: &creds.secret_access_key,
            session_token: &creds.session_token,
            expiration: creds
                .expiration
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProcessCommand {}

impl ProcessCommand {
    pub async fn execute<C: Clock, P: RoleCredentialsProvider>(
        self,
        resolver: &Resolver<C, P>,
        out: &mut impl Write,
    ) -> Result<()> {
        let credentials = resolver.resolve().await?;

        serde_json::to_writer(&mut *out, &CredentialProcessOutput::from(&credentials))
            .context("Failed to write credentials to stdout")?;
        writeln!(out).context("Failed to write credentials to stdout")?;
        Ok(())
    }
}
