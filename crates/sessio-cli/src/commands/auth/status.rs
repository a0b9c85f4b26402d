//! Status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalConfig;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;
    let tokens = cli_session
        .session()
        .tokens()
        .context("Failed to read credentials")?;

    let status = if tokens.is_some() {
        "authenticated"
    } else {
        "unauthenticated"
    };

    output::field("Status", status);
    output::field("API", cli_session.api().as_str());
    output::field(
        "Credentials",
        &cli_session.credentials_path().display().to_string(),
    );

    Ok(())
}
