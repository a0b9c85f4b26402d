//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use sessio_core::Profile;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a profile as labeled fields.
pub fn profile(profile: &Profile) {
    field("User ID", &profile.user_id);
    field("Username", &profile.username);
    field("Name", &profile.name);
    field("Email", &profile.email);
    field("Created", &profile.created_at.to_rfc3339());
    if let Some(updated_at) = &profile.updated_at {
        field("Updated", &updated_at.to_rfc3339());
    }
}
