//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use marksearch_client::ImageVariant;

/// Search a national trademark registry.
#[derive(Parser)]
#[command(name = "marksearch", version, about)]
pub struct Cli {
    /// Registry base URL.
    #[arg(long, env = "MARKSEARCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Durable token cache file ("off" to keep auth state in memory only).
    #[arg(long, global = true)]
    pub token_cache: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Free-text trademark search.
    Search {
        /// Query text.
        query: String,

        /// Zero-based result page.
        #[arg(long, default_value_t = 0)]
        page: u64,

        /// Results per page.
        #[arg(long)]
        page_size: Option<u64>,

        /// Sort key understood by the registry (e.g. "relevance").
        #[arg(long)]
        sort: Option<String>,
    },

    /// Fetch one record's notice as JSON.
    Notice {
        /// Record identifier.
        id: String,
    },

    /// Download a mark image.
    Image {
        /// Record identifier.
        id: String,

        /// Image rendition.
        #[arg(long, default_value = "thumbnail")]
        variant: ImageVariant,

        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Drop all cached auth state; the next command starts a clean login.
    ClearSession,
}
