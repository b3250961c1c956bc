use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "meshcfg", version, about = "Mesh device preference sync CLI")]
pub struct Cli {
    /// Toml settings file with default port, link kind, and field help
    #[arg(long)]
    pub settings: Option<String>,
    /// Serial port of the target device
    #[arg(long)]
    pub port: Option<String>,
    /// Link kind: serial or loopback
    #[arg(long)]
    pub link: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the serial-plugin preference fields
    Fields,
    /// Fetch preferences from the device
    Get {
        /// Print a single field instead of the whole block
        field: Option<String>,
    },
    /// Apply FIELD=VALUE assignments and commit them to the device
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Fetch preferences and save them as JSON
    Export {
        #[arg(long)]
        file: String,
    },
    /// Load preferences from JSON and commit them to the device
    Import {
        #[arg(long)]
        file: String,
    },
}
