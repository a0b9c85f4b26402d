//! Credential file locations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use sessio_core::ApiUrl;

/// Get the directory holding one credential file per API.
fn credentials_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "sessio").context("Could not determine data directory")?;

    let dir = dirs.data_dir().join("credentials");
    fs::create_dir_all(&dir).context("Failed to create credentials directory")?;

    Ok(dir)
}

/// Get the credential file path for an API.
pub fn credentials_path(api: &ApiUrl) -> Result<PathBuf> {
    Ok(credentials_dir()?.join(format!("{}.json", api.storage_key())))
}
