//! Refresh token command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use sessio_core::Error;

use crate::cli::GlobalConfig;
use crate::commands::end_session;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(_args: RefreshTokenArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;
    cli_session.require_login()?;

    eprintln!("{}", "Refreshing session...".dimmed());

    match cli_session.session().refresh().await {
        Ok(()) => {}
        // The identity provider refused the refresh token.
        Err(err @ Error::Protocol(_)) => return Err(end_session(&cli_session, err)),
        Err(err) if err.is_session_terminated() => return Err(end_session(&cli_session, err)),
        Err(err) => return Err(anyhow::Error::new(err).context("Failed to refresh session")),
    }

    output::success("Session refreshed successfully");
    output::field("API", cli_session.api().as_str());

    Ok(())
}
