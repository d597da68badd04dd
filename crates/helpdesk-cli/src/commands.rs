//! Config and schema command implementations

use anyhow::Result;
use colored::Colorize;
use helpdesk_core::Config;
use std::path::{Path, PathBuf};

fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::default_path()?),
    }
}

/// Show current configuration
pub fn config_show(path: Option<&Path>) -> Result<()> {
    let path = config_path(path)?;
    let config = Config::load(&path)?;

    println!("{}", "Current configuration:".bold());
    println!();
    println!("unique_emails = {}", config.unique_emails);
    println!("seed_demo_data = {}", config.seed_demo_data);
    println!();
    println!("[display]");
    println!("colors = {}", config.display.colors);
    println!("date_format = \"{}\"", config.display.date_format);
    println!("category_preview = {}", config.display.category_preview);

    Ok(())
}

/// Reset configuration to defaults
pub fn config_reset(path: Option<&Path>) -> Result<()> {
    let path = config_path(path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::default_with_comments())?;

    println!(
        "{} Configuration reset to defaults at {}",
        "✓".green(),
        path.display()
    );
    Ok(())
}

/// Output JSON schema for config file
pub fn schema() -> Result<()> {
    let schema = serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "helpdesk Configuration",
        "description": "Configuration file for the helpdesk terminal",
        "type": "object",
        "properties": {
            "unique_emails": {
                "type": "boolean",
                "description": "Reject registrations that reuse an existing email address",
                "default": false
            },
            "seed_demo_data": {
                "type": "boolean",
                "description": "Populate the demo dataset (users, tickets, articles) at startup",
                "default": true
            },
            "display": {
                "type": "object",
                "properties": {
                    "colors": {
                        "type": "boolean",
                        "description": "Use colors in output",
                        "default": true
                    },
                    "date_format": {
                        "type": "string",
                        "description": "Date format for display (strftime format)",
                        "default": "%Y-%m-%d %H:%M"
                    },
                    "category_preview": {
                        "type": "integer",
                        "description": "How many tickets to show per category in the grouped view",
                        "minimum": 1,
                        "default": 5
                    }
                }
            }
        }
    });
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
