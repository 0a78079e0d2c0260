//! resume-tui - A terminal client for the resume analysis service
//!
//! Pick a PDF or DOCX resume, upload it, and browse the ATS report.
//! Uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::HttpAnalyzer;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "resume-tui", version, about = "Analyze a resume against ATS expectations")]
struct Args {
    /// Resume to pre-select (.pdf or .docx)
    file: Option<PathBuf>,

    /// Analysis endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Persist the effective endpoint and timeout to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = Config::load().unwrap_or_default();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if args.save_config {
        config.save().context("failed to save config")?;
    }
    tracing::info!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "starting resume-tui");

    let analyzer = HttpAnalyzer::new(config.endpoint.clone(), config.timeout())
        .context("failed to build HTTP client")?;
    let mut app = App::new(config, Arc::new(analyzer))?;
    if let Some(file) = &args.file {
        app.select_path(&file.display().to_string());
    }

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("fatal: {err:?}");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("draw error: {e:?}");
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            // No event - send a tick to poll the in-flight request
            None => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            if a != Action::Tick {
                tracing::debug!(action = %a, "dispatch");
            }
            current_action = app.update(a)?;
        }
    }

    Ok(())
}

/// Log to `~/.resume-tui/resume-tui.log`; stdout belongs to the UI
fn init_logging() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("resume-tui.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
