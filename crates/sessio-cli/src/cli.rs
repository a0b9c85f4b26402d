//! CLI argument definitions.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use sessio_core::ApiUrl;
use sessio_file::DEFAULT_MAX_AGE_HOURS;

use crate::commands::auth::AuthCommand;
use crate::commands::profile::ProfileCommand;

/// Sign up, sign in and manage your profile.
#[derive(Parser, Debug)]
#[command(name = "sessio")]
#[command(author, version = env!("SESSIO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub config: GlobalConfig,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalConfig {
    /// API base URL, including any stage path (e.g. https://api.example.com/prod)
    #[arg(long = "api", env = "SESSIO_API_URL", global = true)]
    pub api: Option<String>,

    /// Hours before stored credentials are discarded
    #[arg(
        long,
        env = "SESSIO_CREDENTIAL_TTL_HOURS",
        default_value_t = DEFAULT_MAX_AGE_HOURS,
        value_parser = clap::value_parser!(i64).range(1..),
        global = true
    )]
    pub credential_ttl_hours: i64,
}

impl GlobalConfig {
    /// Returns the validated API URL.
    pub fn api_url(&self) -> Result<ApiUrl> {
        let raw = self
            .api
            .as_deref()
            .context("No API URL configured. Pass --api or set SESSIO_API_URL.")?;
        ApiUrl::new(raw).context("Invalid API URL")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Profile operations (requires login)
    Profile(ProfileCommand),
}
