//! Configuration resolution module
//!
//! This module handles:
//! - Loading the optional TOML config file
//! - Resolving the service base URL (flag > env > file > default)
//! - Reading the scenario text
//! - Building the immutable `Settings` the rest of the program uses

use crate::cli::{CliArgs, default_config_path};
use crate::error::ConfigError;
use crate::types::TemplateType;
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Local development address of the analysis service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the service base URL
pub const BASE_URL_ENV: &str = "COREP_API_URL";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub template_type: Option<TemplateType>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub template_type: TemplateType,
    pub scenario: Option<String>,
    pub output_dir: PathBuf,
    pub use_colors: bool,
}

/// Build `Settings` from CLI arguments, the environment and the config file
pub fn build_settings(args: &CliArgs) -> Result<Settings, ConfigError> {
    let file = load_file_config(args.config.as_deref())?;
    let env_url = env::var(BASE_URL_ENV).ok();

    let base_url = resolve_base_url(args.base_url.as_deref(), env_url.as_deref(), file.base_url.as_deref());
    validate_base_url(&base_url)?;
    debug!("Using analysis service at {}", base_url);

    let template_type = args.template_type.or(file.template_type).unwrap_or_default();
    let output_dir = args.output_dir.clone().or(file.output_dir).unwrap_or_else(|| PathBuf::from("."));

    Ok(Settings {
        base_url,
        template_type,
        scenario: read_scenario(args)?,
        output_dir,
        use_colors: !args.no_color,
    })
}

/// Load the config file
///
/// An explicit path must exist. The default location is optional.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(FileConfig::default());
            }
        },
    };

    debug!("Loading config from {:?}", path);
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
    parse_file_config(&text, &path)
}

pub fn parse_file_config(text: &str, path: &Path) -> Result<FileConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// First non-empty of flag, environment, file; else the default
pub fn resolve_base_url(flag: Option<&str>, env_value: Option<&str>, file_value: Option<&str>) -> String {
    [flag, env_value, file_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

fn validate_base_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("Base URL must start with http:// or https://, got '{}'", url)))
    }
}

/// Scenario from `--scenario` or `--scenario-file`; blank text counts as none
pub fn read_scenario(args: &CliArgs) -> Result<Option<String>, ConfigError> {
    let text = match (&args.scenario, &args.scenario_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            fs::read_to_string(path).map_err(|source| ConfigError::Scenario { path: path.clone(), source })?
        }
        (None, None) => return Ok(None),
    };

    let trimmed = text.trim();
    Ok(if trimmed.is_empty() { None } else { Some(trimmed.to_string()) })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
