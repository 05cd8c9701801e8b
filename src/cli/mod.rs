pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oolong", about = "Offline-first news cache", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the latest headlines into the local cache
    Refresh,
    /// Show cached headlines, refreshing in the background
    List {
        /// Maximum number of headlines to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show cache size and capacity
    Status,
    /// Drop every cached article
    Clear,
}
