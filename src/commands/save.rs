use anyhow::Result;
use clap::Args;

use crate::{
    aws::{RoleCredentialsProvider, credentials},
    clock::Clock,
    resolver::Resolver,
};

#[derive(Debug, Clone, Args)]
pub struct SaveCommand {}

impl SaveCommand {
    pub async fn execute<C: Clock, P: RoleCredentialsProvider>(
        self,
        resolver: &Resolver<C, P>,
    ) -> Result<()> {
        let creds = resolver.resolve().await?;
        credentials::save_credentials(&resolver.paths().credentials, &creds)?;
        Ok(())
    }
}
