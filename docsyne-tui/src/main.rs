mod api;
mod app;
mod cli;
mod config;
mod logging;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use api::ApiClient;
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::DocsyneConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use doctor_directory::{MemoryLocation, FIND_DOCTOR_PATH};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env.tui
    dotenvy::from_filename(".env.tui").ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = DocsyneConfig::ensure_default_file()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run(args) => {
            let cfg = DocsyneConfig::load()?;
            logging::init_file_logging(&cfg.log_path()?)?;
            let client = ApiClient::new(&cfg)?;
            run(client, args.location).await
        }
        Commands::Dev(args) => {
            let cfg = DocsyneConfig::load()?;
            logging::init_file_logging(&cfg.log_path()?)?;
            run(ApiClient::dev(), args.location).await
        }
    }
}

async fn run(client: ApiClient, location: Option<String>) -> Result<()> {
    let location = location
        .map(|href| MemoryLocation::from_href(FIND_DOCTOR_PATH, &href))
        .unwrap_or_default();
    info!(location = %location, source = %client.source_label(), "starting docsyne-tui");

    let mut app = App::new(location, client.source_label());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("event loop failed: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    info!(location = %app.href(), "exiting docsyne-tui");
    println!("{}", app.href());

    res
}
