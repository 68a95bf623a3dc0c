use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize)]
pub struct Met {
    pub base_url: String,
}

#[derive(Deserialize)]
pub struct Files {
    pub display_path: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub geo_ref: GeoRef,
    pub met: Met,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

/// Error depicting errors that occur while loading configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
}
