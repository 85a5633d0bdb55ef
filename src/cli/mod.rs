//! CLI module - Command-line interface for the Space Explorer service
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{cmd_apod, cmd_photo, cmd_photos};

use clap::{Parser, Subcommand};

/// Space Explorer - NASA APOD and Mars Rover photo proxy
#[derive(Parser)]
#[command(name = "space-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create a default config.toml in the current directory
    Init,

    /// Print today's Astronomy Picture of the Day
    Apod,

    /// Look up Mars Rover photos through the cache/store/API pipeline
    #[command(alias = "p")]
    Photos {
        /// Rover name
        #[arg(long)]
        rover: Option<String>,

        /// Martian sol
        #[arg(long)]
        sol: Option<i32>,

        /// Camera abbreviation (e.g. FHAZ, NAVCAM)
        #[arg(long)]
        camera: Option<String>,

        /// 1-based page
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Photos per page
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Fetch the N-th photo of a sol directly from the NASA API, bypassing
    /// cache and store
    Photo {
        #[arg(long)]
        rover: Option<String>,

        #[arg(long)]
        sol: Option<i32>,

        #[arg(long)]
        camera: Option<String>,

        /// 1-based photo index
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}
