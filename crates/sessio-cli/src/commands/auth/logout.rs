//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalConfig;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(_args: LogoutArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;

    cli_session
        .session()
        .logout()
        .context("Failed to clear credentials")?;

    output::success("Logged out");
    Ok(())
}
