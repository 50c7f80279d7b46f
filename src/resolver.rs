use tracing::info;

use crate::{
    aws::{Credentials, RoleCredentialsProvider, cache},
    clock::Clock,
    config,
    error::Result,
    paths::AwsPaths,
};

/// Wires the cache scanner, config reader and SSO exchange together.
///
/// Every subcommand resolves credentials the same way and only differs in
/// where they end up.
#[derive(Debug)]
pub struct Resolver<C, P> {
    paths: AwsPaths,
    clock: C,
    provider: P,
}

impl<C: Clock, P: RoleCredentialsProvider> Resolver<C, P> {
    pub fn new(paths: AwsPaths, clock: C, provider: P) -> Self {
        Self {
            paths,
            clock,
            provider,
        }
    }

    pub fn paths(&self) -> &AwsPaths {
        &self.paths
    }

    pub async fn resolve(&self) -> Result<Credentials> {
        let login = cache::scan(&self.paths.sso_cache, &self.clock)?;
        let binding = config::read_role_binding(&self.paths.config)?;

        info!(
            "Requesting AWS credentials for role {} in account {}",
            binding.role_name, binding.account_id
        );
        self.provider.role_credentials(&login, &binding).await
    }
}
