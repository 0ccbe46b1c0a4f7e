//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

/// After a successful publish, ask whether to start a fresh listing
pub fn confirm_create_another() -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt("Create another listing?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}
