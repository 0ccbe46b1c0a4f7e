//! PGnest: PG Listing Publishing CLI Tool
//!
//! A command-line tool for composing, validating and publishing
//! paying-guest listings through a step-by-step terminal wizard.

mod api;
mod cli;
mod listing;
mod report;
mod session;
mod utils;

use anyhow::Result;
use clap::Parser;

use api::{to_submission, ApiError, ListingClient};
use cli::{confirm_create_another, run_wizard, Cli, Commands, WizardMode, WizardOutcome, WizardState};
use report::{print_listing_detail, print_listing_table, print_submit_success};
use session::Session;
use utils::progress::{create_spinner, finish_with_error, finish_with_success};
use utils::styling::{print_banner, print_error, print_info, print_login_hint};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let session = Session::resolve(cli.token.as_deref());
    let client = ListingClient::new(cli.base_url.as_str(), session.clone())?;

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::List { user_id } => run_list(&client, *user_id),
            Commands::Show { id, user_id } => run_show(&client, *id, *user_id),
        };
    }

    // Wizard flow - requires an owner session before anything else
    if !session.is_owner() {
        print_error("Publishing listings needs an owner session.");
        print_login_hint("pgnest");
        std::process::exit(1);
    }

    let mode = match cli.edit {
        Some(id) => {
            let user_id = cli
                .user_id
                .ok_or_else(|| anyhow::anyhow!("--edit requires --user-id"))?;
            WizardMode::Edit { id, user_id }
        }
        None => WizardMode::Create,
    };

    print_banner(env!("CARGO_PKG_VERSION"));

    let mut wizard = WizardState::new(mode);

    // Edit mode: load the existing listing into the draft before the first
    // screen. A failed fetch ends the run; the wizard never refetches.
    if let WizardMode::Edit { id, user_id } = mode {
        let spinner = create_spinner(&format!("Fetching listing #{}...", id));
        match wizard.hydrate(|| client.fetch_one_or_fallback(id, user_id)) {
            Ok(_) => finish_with_success(&spinner, "Listing loaded"),
            Err(ApiError::Unauthorized) => {
                finish_with_error(&spinner, "Not signed in as the owner");
                print_login_hint(&format!("pgnest --edit {}", id));
                std::process::exit(1);
            }
            Err(err) => {
                finish_with_error(&spinner, "Could not load the listing");
                return Err(err.into());
            }
        }
    }

    loop {
        match run_wizard(&mut wizard)? {
            WizardOutcome::Quit => {
                print_info("Cancelled. Nothing was published.");
                return Ok(());
            }
            WizardOutcome::Submit(draft) => {
                let body = to_submission(&draft);
                let updating = matches!(wizard.mode, WizardMode::Edit { .. });
                let spinner = create_spinner(if updating {
                    "Saving changes..."
                } else {
                    "Publishing listing..."
                });

                let result = match wizard.mode {
                    WizardMode::Create => client.create(&body),
                    WizardMode::Edit { id, user_id } => client.update(id, user_id, &body),
                };

                match result {
                    Ok(record) => {
                        finish_with_success(
                            &spinner,
                            if updating {
                                "Changes saved"
                            } else {
                                "Listing published"
                            },
                        );
                        print_submit_success(&record, updating);

                        if !updating && confirm_create_another()? {
                            wizard = WizardState::new(WizardMode::Create);
                            continue;
                        }
                        return Ok(());
                    }
                    Err(ApiError::Unauthorized) => {
                        finish_with_error(&spinner, "Session expired");
                        print_login_hint("pgnest");
                        std::process::exit(1);
                    }
                    Err(err) if err.is_recoverable() => {
                        // Back to the preview with the server's message; the
                        // draft survives for another attempt
                        finish_with_error(&spinner, "Submission failed");
                        wizard.set_remote_error(err.to_string());
                        continue;
                    }
                    Err(err) => {
                        finish_with_error(&spinner, "Submission failed");
                        return Err(err.into());
                    }
                }
            }
        }
    }
}

fn run_list(client: &ListingClient, user_id: u64) -> Result<()> {
    let spinner = create_spinner("Fetching your listings...");
    match client.fetch_mine(user_id) {
        Ok(records) => {
            finish_with_success(&spinner, &format!("{} listing(s)", records.len()));
            print_listing_table(&records);
            Ok(())
        }
        Err(ApiError::Unauthorized) => {
            finish_with_error(&spinner, "Not signed in");
            print_login_hint("pgnest list");
            std::process::exit(1);
        }
        Err(err) => {
            finish_with_error(&spinner, "Could not fetch listings");
            Err(err.into())
        }
    }
}

fn run_show(client: &ListingClient, id: u64, user_id: u64) -> Result<()> {
    let spinner = create_spinner(&format!("Fetching listing #{}...", id));
    match client.fetch_one_or_fallback(id, user_id) {
        Ok(record) => {
            finish_with_success(&spinner, "Listing loaded");
            print_listing_detail(&record);
            Ok(())
        }
        Err(ApiError::Unauthorized) => {
            finish_with_error(&spinner, "Not signed in");
            print_login_hint(&format!("pgnest show {}", id));
            std::process::exit(1);
        }
        Err(err) => {
            finish_with_error(&spinner, "Could not load the listing");
            Err(err.into())
        }
    }
}
