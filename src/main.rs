// summit: summarize articles by URL from the terminal.
// Starts the TUI, or runs a single lookup or history listing from the command line.

mod app;
mod cache;
mod config;
mod error;
mod history;
mod state;
mod summarizer;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::cache::paths;
use crate::config::ServiceConfig;
use crate::error::{Result, SummitError};
use crate::history::{ArticleStore, FileStore, History};
use crate::state::{LookupState, lookup};
use crate::summarizer::SummaryClient;

#[derive(Parser)]
#[command(name = "summit")]
#[command(about = "Summarize articles by URL")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Summarize this URL and print the result instead of starting the TUI
    url: Option<String>,

    /// Print the lookup history and exit
    #[arg(long, conflicts_with = "url")]
    history: bool,

    /// History file location (defaults to the platform data directory)
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_tracing(args.debug);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Exiting");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let path = match args.history_file {
        Some(path) => path,
        None => paths::articles_path().ok_or_else(|| {
            SummitError::Other("No data directory found, pass --history-file".to_string())
        })?,
    };
    let store = FileStore::new(path);
    info!(path = %store.path().display(), "Using article history");
    let mut history = History::load(store);

    if args.history {
        print_history(&history);
        return Ok(ExitCode::SUCCESS);
    }

    let client = SummaryClient::new(&ServiceConfig::from_env()?)?;

    if let Some(url) = args.url {
        let code = match lookup::lookup(&mut history, &client, &url).await {
            LookupState::Success(article) => {
                println!("{}", article.summary);
                ExitCode::SUCCESS
            }
            LookupState::Failed(message) => {
                eprintln!("Well, that wasn't supposed to happen... {}", message);
                ExitCode::FAILURE
            }
            other => {
                error!(state = ?other, "Lookup ended without a result");
                ExitCode::FAILURE
            }
        };
        return Ok(code);
    }

    info!(articles = history.len(), "Starting TUI");
    let mut terminal = ratatui::init();
    let result = App::new(history, client).run(&mut terminal);
    ratatui::restore();
    result?;

    Ok(ExitCode::SUCCESS)
}

fn print_history<S: ArticleStore>(history: &History<S>) {
    if history.is_empty() {
        println!("No articles yet");
        return;
    }

    for article in history.articles() {
        println!("{}", article.url);
        println!("  {}", article.summary);
        println!();
    }
}

/// Log to a file in the cache directory so output does not corrupt the TUI.
fn init_tracing(debug: bool) {
    let Some(path) = paths::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("summit={filter_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}
