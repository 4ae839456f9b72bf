// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! jThinker CLI entrypoint.
//!
//! Opens the given diagram files as tabs and runs the TUI. Logs go to a file because the
//! terminal belongs to the UI.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use jthinker::config::load_config;
use jthinker::tui::{self, App};

const DEFAULT_LOG_FILE: &str = "jthinker.log";

/// Terminal editor for thinking-process diagrams
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Diagram files to open as tabs
    files: Vec<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file (defaults to jthinker.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Flush files and directory entries on save (slower)
    #[arg(long)]
    durable_writes: bool,
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    let path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| format!("cannot open log file {}: {err}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!(log_level:?, log_file = path.display().to_string(); "Starting jThinker");
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_ref())?;
    if args.durable_writes {
        config.durable_writes = true;
    }
    debug!(config:?; "Resolved configuration");

    let mut app = App::new(&config);
    let opened = app.open_startup(&args.files, config.show_placeholder);
    info!(requested = args.files.len(), opened = opened; "Opened startup files");

    tui::run(app)
}

fn main() {
    let args = Args::parse();

    if let Err(err) = init_logging(&args) {
        eprintln!("jthinker: {err}");
        process::exit(1);
    }
    debug!(args:?; "Parsed arguments");

    if let Err(err) = run(&args) {
        error!(error = err.to_string(); "jThinker failed");
        eprintln!("jthinker: {err}");
        process::exit(1);
    }

    info!("Completed successfully");
}
