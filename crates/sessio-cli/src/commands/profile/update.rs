//! Update profile command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sessio_core::ProfileUpdate;

use crate::cli::GlobalConfig;
use crate::commands::check;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// New display name
    #[arg(long)]
    pub name: String,

    /// New email address
    #[arg(long)]
    pub email: String,

    /// Print the updated profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: UpdateArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;
    cli_session.require_login()?;

    let update = ProfileUpdate::new(args.name, args.email);
    let client = cli_session.api_client()?;
    let profile = check(&cli_session, client.update_profile(&update).await)
        .context("Failed to update profile")?;

    if args.json {
        output::json_pretty(&profile)?;
    } else {
        output::success("Profile updated");
        println!();
        output::profile(&profile);
    }

    Ok(())
}
