use std::io;

use clap::Parser;
use tracing::{info, warn};

mod app;
mod cli;
mod config;
mod document;
mod entry;
mod error;
mod fs_ops;
mod logging;
mod runtime;
mod source;
mod task;
mod theme;
mod types;
mod ui;
mod util;
mod watcher;

use app::App;
use cli::Args;
use config::Config;

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.init_config {
        let path = args
            .config
            .clone()
            .or_else(Config::default_path)
            .ok_or_else(|| io::Error::other("no config directory available"))?;
        Config::default().save_to(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(log_path) = args.log_file.clone().or_else(logging::default_log_path) {
        // Running without a log file is fine, but say so before the TUI starts.
        if let Err(err) = logging::init(&log_path, args.verbose) {
            eprintln!(
                "lazytxt: logging disabled ({}): {err}",
                log_path.display()
            );
        }
    }

    let config = Config::load(args.config.as_deref()).map_err(io::Error::other)?;
    let start = args
        .path
        .as_deref()
        .map(source::resolve)
        .transpose()
        .map_err(|e| io::Error::other(e.to_string()))?;
    info!(start = ?start, "starting");

    let mut app = App::new(config, start)?;
    let result = runtime::run(&mut app);
    if let Err(err) = &result {
        warn!(error = %err, "exited with error");
    }
    result
}
