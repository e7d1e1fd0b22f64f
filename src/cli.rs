//! Command-line interface definition for boardctl
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication and board CRUD.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// boardctl - board API client
///
/// Sign in once, then read and write posts; expired access tokens are
/// refreshed transparently.
#[derive(Parser, Debug, Clone)]
#[command(name = "boardctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "boardctl.yaml")]
    pub config: String,

    /// Backend base URL override
    #[arg(long, env = "BOARDCTL_BASE_URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for boardctl
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the credential pair
    Login {
        /// Account email
        #[arg(short, long)]
        username: String,

        /// Password; prompted when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        /// Account email
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Password; prompted when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Discard the stored credential pair
    Logout,

    /// Board operations
    Boards {
        /// Board subcommand
        #[command(subcommand)]
        command: BoardCommand,
    },
}

/// Board subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum BoardCommand {
    /// List posts
    List {
        /// Page number (0-based)
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 100)]
        size: u32,

        /// Show only posts in this category key
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one post
    Show {
        /// Post id
        id: u64,
    },

    /// Create a post
    Create {
        /// Post title
        #[arg(long)]
        title: String,

        /// Post body
        #[arg(long)]
        content: String,

        /// Category key (see `boards categories`)
        #[arg(long)]
        category: String,

        /// Attach a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Edit a post; omitted fields keep their current values
    Edit {
        /// Post id
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        content: Option<String>,

        /// New category key
        #[arg(long)]
        category: Option<String>,

        /// Replace the attached file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a post
    Delete {
        /// Post id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List category keys and labels
    Categories,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: "boardctl.yaml".to_string(),
            base_url: None,
            verbose: false,
            command: Commands::Logout,
        }
    }
}
