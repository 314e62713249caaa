//! Config command handler
//!
//! `set`, `unset` and `reset` edit the stored file directly, so per-run
//! overrides such as `--out-dir` never end up persisted. `get` shows the
//! effective configuration, overrides included.

use crate::args::ConfigSubcommand;
use isms_view::config::{Config, CONFIG_KEYS};
use isms_view::core::process_model::OUTPUT_STEM;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Dispatch config subcommands against the user config file
///
/// # Errors
/// Returns a printable message for unknown keys, invalid values or I/O failures.
pub fn run(subcommand: Option<ConfigSubcommand>, effective: &Config) -> Result<(), String> {
    let path = Config::get_config_file_path();

    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            print!("{}", summary(effective, &path));
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            println!("{}", value_of(effective, &key)?);
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            println!("{}", set(&path, &key, &value)?);
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            println!("{}", unset(&path, &key)?);
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&path, &mut io::stdin().lock()),
    }
}

fn ensure_known(key: &str) -> Result<(), String> {
    if CONFIG_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(format!(
            "Unknown config key: '{key}' (known: {})",
            CONFIG_KEYS.join(", ")
        ))
    }
}

/// Stored value of `key`, with `$ISMSVIEW` expanded
fn value_of(config: &Config, key: &str) -> Result<String, String> {
    ensure_known(key)?;
    Ok(config
        .get(key)
        .map(|value| Config::expand_variables(&value))
        .unwrap_or_default())
}

/// Full configuration plus where its paths lead
fn summary(config: &Config, path: &Path) -> String {
    let mut out = String::from("\n=== Configuration ===\n\n");
    let _ = write!(out, "{config}");

    let document = config.output_dir().join(format!("{OUTPUT_STEM}.html"));
    let _ = writeln!(out, "\nDocument:  {}", document.display());
    if config.logging.file.is_empty() {
        let _ = writeln!(out, "Log file:  none (messages go to the terminal)");
    } else {
        let _ = writeln!(out, "Log file:  {}", Config::expand_variables(&config.logging.file));
    }

    let state = if path.exists() { "" } else { ", not created yet" };
    let _ = writeln!(out, "(file: {}{state})", path.display());
    out
}

/// Set `key` in the file at `path`, returning the confirmation line
fn set(path: &Path, key: &str, value: &str) -> Result<String, String> {
    ensure_known(key)?;

    let mut stored = Config::load_from(path);
    stored.set(key, value)?;
    stored
        .save_to(path)
        .map_err(|e| format!("Failed to save config: {e}"))?;

    let saved = stored.get(key).unwrap_or_default();
    let expanded = Config::expand_variables(&saved);
    if expanded == saved {
        Ok(format!("✓ Set {key} = {saved}"))
    } else {
        Ok(format!("✓ Set {key} = {saved} ({expanded})"))
    }
}

/// Restore the default for `key` in the file at `path`
fn unset(path: &Path, key: &str) -> Result<String, String> {
    ensure_known(key)?;

    if !path.exists() {
        return Ok(format!("✓ {key} is already at its default"));
    }

    let mut stored = Config::load_from(path);
    stored.unset(key, &Config::from_defaults())?;
    stored
        .save_to(path)
        .map_err(|e| format!("Failed to save config: {e}"))?;

    Ok(format!(
        "✓ Reset {key} to default ({})",
        stored.get(key).unwrap_or_default()
    ))
}

/// Delete the file at `path` once the user answers yes on `input`
fn reset(path: &Path, input: &mut impl BufRead) -> Result<(), String> {
    if !path.exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset {} to defaults? (y/n): ", path.display());
    io::stdout().flush().ok();

    let mut response = String::new();
    input
        .read_line(&mut response)
        .map_err(|e| format!("Failed to read confirmation: {e}"))?;

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset(path).map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
