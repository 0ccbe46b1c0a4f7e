//! CLI module - argument parsing, prompts and the listing wizard

pub mod args;
pub mod prompts;
pub mod wizard;

pub use args::{Cli, Commands};
pub use prompts::confirm_create_another;
pub use wizard::{run_wizard, Step, WizardMode, WizardOutcome, WizardState};
