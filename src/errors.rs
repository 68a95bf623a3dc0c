use thiserror::Error;

/// Error depicting errors that occur while running the weather panel
///
#[derive(Debug, Error)]
#[error("error while running weather panel: {0}")]
pub struct PanelError(pub String);
