mod config;
mod error;
mod intent;
mod journal;
mod matcher;
mod reply;
mod session;
mod signals;
mod store;

use anyhow::Result;
use log::{debug, error, info, warn};
use std::io::{BufRead, Write};
use std::path::Path;

const QUIT_COMMAND: &str = "/quit";

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = config::Config::from_env()?;
    info!("Field report chat starting...");
    info!("Type a report and press Enter; {QUIT_COMMAND}, Ctrl+D or Ctrl+C to finish");

    let sites = match &config.sites {
        Some(path) => match planner::load_sites(path) {
            Ok(sites) => {
                info!("Loaded {} sites from {}", sites.len(), path.display());
                sites
            }
            Err(e) => {
                warn!("Failed to load sites from {}: {e}", path.display());
                warn!("Using mock assets instead.");
                planner::mock_assets()
            }
        },
        None => planner::mock_assets(),
    };

    let output_dir = config.output_dir.as_deref().unwrap_or(Path::new("."));
    let journal = match journal::Journal::open(output_dir) {
        Ok(journal) => journal,
        Err(e) => fail(e),
    };
    let mut session = session::Session::with_journal(sites, journal.clone())?;
    info!("Output directory: {}", output_dir.display());
    info!("Saved requests: {}", session.saved_requests());
    debug!("Restored messages: {}", session.store().messages().len());

    let on_signal = journal.clone();
    signals::setup_exit_handler(move || finish_and_exit(&on_signal))?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == QUIT_COMMAND {
            break;
        }
        for reply in session.handle(&line) {
            writeln!(stdout, "bot> {reply}")?;
        }
        stdout.flush()?;
    }

    finish_and_exit(&journal);
}

/// Every message is already on disk; report where it went and exit
fn finish_and_exit(journal: &journal::Journal) -> ! {
    let _ = std::io::stdout().flush();
    match journal.load() {
        Ok(store) if store.is_empty() => {
            info!("No messages recorded.");
            std::process::exit(0);
        }
        Ok(store) => {
            info!("Chat saved to: {}", journal.chat_path().display());
            info!("Requests saved to: {}", journal.requests_path().display());
            info!("Saved requests: {}", store.requests().len());
            std::process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: error::ReportError) -> ! {
    error!("Error: {e}");
    if let error::ReportError::CreateDir { .. }
    | error::ReportError::CreateFile { .. }
    | error::ReportError::WriteFile { .. } = e
    {
        error!("Hint: Run in a writable directory or set FIELD_REPORTS_OUTPUT_DIR.");
    }
    let _ = std::io::stderr().flush();
    std::process::exit(1);
}
