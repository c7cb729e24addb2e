use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{services::tasks::load_screen, storage::json::JsonFileStorage};

mod models;
mod services;
mod storage;
mod ui;

#[derive(Parser)]
#[command(
    name = "tday",
    version,
    about = "A minimal and clean to-do list for your terminal"
)]
struct Cli {
    /// Path to the state file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q warnings off, -qq errors only)
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

fn init_tracing(verbose: u8, quiet: u8) {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };
    // RUST_LOG wins over the flag-derived level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

fn state_file_path(cli: &Cli) -> PathBuf {
    match &cli.data_file {
        Some(path) => path.clone(),
        None => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tday")
            .join("state.json"),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let state_file = state_file_path(&cli);

    // Create parent directory if it doesn't exist
    if let Some(parent) = state_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error: Failed to create data directory: {}", e);
            std::process::exit(1);
        });
    }

    let storage = JsonFileStorage::new(state_file);
    let screen = load_screen(&storage);

    if let Err(e) = ui::run(screen, storage) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
