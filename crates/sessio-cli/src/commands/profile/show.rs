//! Show profile command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalConfig;
use crate::commands::check;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;
    cli_session.require_login()?;

    let client = cli_session.api_client()?;
    let profile = check(&cli_session, client.get_profile().await)
        .context("Failed to load profile")?;

    if args.json {
        output::json_pretty(&profile)?;
    } else {
        output::profile(&profile);
    }

    Ok(())
}
