//! Auth subcommand implementations.

mod login;
mod logout;
mod refresh_token;
mod signup;
mod status;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::GlobalConfig;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Create a new account
    Signup(signup::SignupArgs),

    /// Sign in and store the session tokens
    Login(login::LoginArgs),

    /// Forget the stored session tokens
    Logout(logout::LogoutArgs),

    /// Refresh the session tokens
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Show whether a session is stored
    Status(status::StatusArgs),
}

pub async fn handle(cmd: AuthCommand, config: &GlobalConfig) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Signup(args) => signup::run(args, config).await,
        AuthSubcommand::Login(args) => login::run(args, config).await,
        AuthSubcommand::Logout(args) => logout::run(args, config),
        AuthSubcommand::RefreshToken(args) => refresh_token::run(args, config).await,
        AuthSubcommand::Status(args) => status::run(args, config),
    }
}
