use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "docsyne-tui")]
#[command(about = "Terminal UI for browsing the DocSyne doctor directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse the listing served by the configured endpoint
    Run(LocationArgs),
    /// Browse bundled sample doctors without touching the network
    Dev(LocationArgs),
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Location to open, e.g. "/find-doctor?consultType=video&sort=fees"
    #[arg(long, short)]
    pub location: Option<String>,
}
