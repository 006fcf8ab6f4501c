//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/atask/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use atask_query::DEFAULT_SOON_HORIZON;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Keys accepted by `atask config set`.
const VALID_KEYS: &str = "notes_directory, soon_horizon, output.color";

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Directory holding task and project files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_directory: Option<PathBuf>,

    /// Days ahead that `due:soon` covers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soon_horizon: Option<u32>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            notes_directory: None,
            soon_horizon: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the configured soon horizon, or the default.
    pub fn soon_horizon(&self) -> u32 {
        self.soon_horizon.unwrap_or(DEFAULT_SOON_HORIZON)
    }

    /// Returns the notes directory with a leading `~` expanded.
    pub fn notes_directory(&self) -> Option<PathBuf> {
        self.notes_directory.as_deref().map(expand_home)
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/atask/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("ATASK_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    // Use XDG_CONFIG_HOME if set, otherwise ~/.config/atask
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("atask"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("atask"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("ATASK_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
///
/// Version 1 treats a blank `notes_directory` as unset, the same way
/// `config set` refuses one.
fn migrate_config(mut config: Config) -> Result<Config> {
    let blank_dir = config
        .notes_directory
        .as_deref()
        .is_some_and(|dir| dir.to_string_lossy().trim().is_empty());
    if blank_dir {
        config.notes_directory = None;
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref dir) = config.notes_directory {
                println!("  notes_directory: {}", dir.display());
            }
            println!("  soon_horizon: {}", config.soon_horizon());

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
        } else {
            println!("(No config file exists. Run 'atask config set notes_directory <path>' to create one.)");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies `key = value` to `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "notes_directory") => {
            if value.trim().is_empty() {
                return Err(CommandError::Config(
                    "notes_directory cannot be empty".to_string(),
                ));
            }
            config.notes_directory = Some(PathBuf::from(value));
        }
        (None, "soon_horizon") => {
            let days = value.parse::<u32>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid soon_horizon value '{}'. Use a whole number of days",
                    value
                ))
            })?;
            config.soon_horizon = Some(days);
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key, VALID_KEYS
            )));
        }
    }

    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
