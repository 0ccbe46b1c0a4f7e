//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};

/// PGnest - Publish and manage paying-guest listings from your terminal
#[derive(Parser, Debug)]
#[command(name = "pgnest")]
#[command(author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the listings API
    #[arg(long, default_value = "http://localhost:8000/api")]
    pub base_url: String,

    /// Bearer token for an owner session.
    /// Falls back to the PGNEST_TOKEN environment variable, then to the
    /// stored session file.
    #[arg(long)]
    pub token: Option<String>,

    /// Edit an existing listing instead of creating a new one.
    /// Requires --user-id so the listing can be fetched.
    #[arg(short, long, value_name = "ID")]
    pub edit: Option<u64>,

    /// Owner user id, used to scope fetches in edit mode
    #[arg(short, long)]
    pub user_id: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show all listings owned by a user
    List {
        /// Owner user id
        #[arg(short, long)]
        user_id: u64,
    },

    /// Show one listing in full
    Show {
        /// Listing id
        id: u64,

        /// Owner user id
        #[arg(short, long)]
        user_id: u64,
    },
}
