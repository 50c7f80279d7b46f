//! Materialize temporary AWS credentials from a cached `aws sso login` session.
//!
//! The pipeline scans `~/.aws/sso/cache` for the freshest login, reads the
//! role binding from `~/.aws/config`, and exchanges the token at the SSO
//! portal. The result is printed as shell exports or merged into
//! `~/.aws/credentials`.

pub mod aws;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod paths;
pub mod resolver;

pub use error::{Error, Result};
