//! Profile subcommand implementations.

mod show;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalConfig;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Display your profile
    Show(show::ShowArgs),

    /// Change your name and email
    Update(update::UpdateArgs),
}

pub async fn handle(cmd: ProfileCommand, config: &GlobalConfig) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Show(args) => show::run(args, config).await,
        ProfileSubcommand::Update(args) => update::run(args, config).await,
    }
}
