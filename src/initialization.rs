use std::env;
use log::info;
use thiserror::Error;
use crate::config::{Config, LoadConfigurationError, load_config};
use crate::logging::{LoggerError, setup_logger};
use crate::manager_met::{Met, MetError};

pub struct Mgr {
    pub met: Met,
}

/// Initializes and returns configuration and a Mgr struct holding the configured managers
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = args.iter()
        .find(|p| p.starts_with("--config="))
        .expect("config file argument should be present");
    let config_path = config_path
        .split_once('=')
        .expect("config file argument should be correct")
        .1;


    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;


    // Print version
    info!("starting weather panel version: {}", env!("CARGO_PKG_VERSION"));


    // Instantiate structs
    let met = Met::new(&config)?;

    let mgr = Mgr { met };

    Ok((config, mgr))
}

/// Error depicting errors that occur while initializing the weather panel
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("MetSetupError: {0}")]
    MetSetupError(#[from] MetError),
}
