//! Signup command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sessio_core::NewAccount;

use crate::cli::GlobalConfig;
use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Username to register
    #[arg(long)]
    pub username: String,

    /// Contact email address
    #[arg(long)]
    pub email: String,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Password (at least 8 characters with upper, lower, digit and symbol)
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: SignupArgs, config: &GlobalConfig) -> Result<()> {
    let cli_session = CliSession::open(config)?;
    let account = NewAccount {
        username: args.username,
        email: args.email,
        password: args.password,
        name: args.name,
    };

    eprintln!("{}", "Creating account...".dimmed());

    let created = cli_session
        .session()
        .sign_up(&account)
        .await
        .context("Failed to create account")?;

    output::success("Account created. Run 'sessio auth login' to sign in.");
    println!();
    output::field("User ID", &created.user_id);
    output::field("Username", &created.username);
    output::field("Email", &created.email);

    Ok(())
}
