use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tdarr-bridge")]
#[command(author, version, about = "Dashboard adapter for the Tdarr transcoding service")]
pub struct Cli {
    /// Path to settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which app to query
#[derive(Args, Debug, Clone)]
pub struct AppArgs {
    /// App id inside the config set
    #[arg(long = "app")]
    pub app_id: String,

    /// Name of the config set
    #[arg(long, default_value = "default")]
    pub config_set: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print library statistics as JSON
    Statistics {
        #[command(flatten)]
        app: AppArgs,
    },

    /// Print running workers as JSON
    Workers {
        #[command(flatten)]
        app: AppArgs,
    },

    /// Print one page of the queue as JSON
    Queue {
        #[command(flatten)]
        app: AppArgs,

        /// Append the health-check queue after the transcode queue
        #[arg(long)]
        health_checks: bool,

        /// Entries per page
        #[arg(long, default_value = "10")]
        page_size: u64,

        /// Zero-based page index
        #[arg(long, default_value = "0")]
        page: u64,
    },

    /// Validate settings file
    Validate {
        /// Settings file to validate (uses default if not specified)
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
