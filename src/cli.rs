use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::{
    io::{self, Write},
    process::ExitCode,
};

use crate::{
    aws::{RoleCredentialsProvider, SsoClient},
    clock::{Clock, SystemClock},
    commands::{CompletionsCommand, EnvCommand, ProcessCommand, SaveCommand},
    paths::AwsPaths,
    resolver::Resolver,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "ssocred", version, about = "Turn a cached AWS SSO login into temporary credentials", long_about = None)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Print shell export statements for the credentials")]
    Env(EnvCommand),
    #[command(about = "Write the credentials to the default profile of ~/.aws/credentials")]
    Save(SaveCommand),
    #[command(about = "Print the credentials as credential_process JSON")]
    Process(ProcessCommand),
    #[command(about = "Generate shell completion scripts for ssocred")]
    Completions(CompletionsCommand),
}

impl Commands {
    pub async fn run<C: Clock, P: RoleCredentialsProvider>(
        self,
        resolver: &Resolver<C, P>,
        out: &mut impl Write,
    ) -> Result<()> {
        match self {
            Self::Env(cmd) => cmd.execute(resolver, out).await,
            Self::Save(cmd) => cmd.execute(resolver).await,
            Self::Process(cmd) => cmd.execute(resolver, out).await,
            Self::Completions(cmd) => cmd.execute(out),
        }
    }
}

impl Cli {
    /// Exit code after a failed parse: help and version output are not failures,
    /// every usage error is a plain failure like any other.
    pub fn parse_exit_code(err: &clap::Error) -> ExitCode {
        if err.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    pub async fn execute(self) -> Result<()> {
        let mut stdout = io::stdout().lock();

        match self.command {
            Commands::Completions(cmd) => cmd.execute(&mut stdout),
            command => {
                let resolver = Resolver::new(AwsPaths::discover()?, SystemClock, SsoClient::new());
                command.run(&resolver, &mut stdout).await
            }
        }
    }
}
