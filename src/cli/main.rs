//! Command-line interface entry point for `ismsview`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use isms_view::config::Config;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if init_file_logging(log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
        }
    }

    let result = match args.command {
        None => commands::generate::run(None, "html", &config).map(drop),
        Some(Command::Generate { output, format }) => {
            commands::generate::run(output.as_deref(), &format, &config).map(drop)
        }
        Some(Command::Check) => {
            if commands::check::run() {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Some(Command::Config { subcommand }) => commands::config::run(subcommand, &config),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
