//! User interaction utilities for the CLI.
//!
//! Responsibilities:
//! - Provide shared helpers for interactive user prompts.
//! - Keep delete confirmations consistent across commands.

use anyhow::Result;
use dialoguer::Confirm;

/// Ask before deleting `item_name`; anything but an explicit yes declines.
pub fn confirm_delete(item_name: &str, item_type: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete {item_type} '{item_name}'?"
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Delete cancelled.");
    }
    Ok(confirmed)
}

/// Skip the prompt when `force` is set.
pub fn confirmed(force: bool, item_name: &str, item_type: &str) -> Result<bool> {
    if force {
        return Ok(true);
    }
    confirm_delete(item_name, item_type)
}
