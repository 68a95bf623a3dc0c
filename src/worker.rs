use std::fs;
use log::{error, info};
use thiserror::Error;
use crate::config::Files;
use crate::initialization::Mgr;
use crate::render::RenderState;

/// Runs one fetch, render and publish cycle. Fetch and selection failures are
/// classified into the render state's error banner and never escape the tick;
/// only a failure to publish the state is returned.
///
/// # Arguments
///
/// * 'mgr' - struct with configured managers
/// * 'state' - render state carried across ticks
/// * 'files' - files config
pub fn run_tick(mgr: &Mgr, state: &mut RenderState, files: &Files) -> Result<(), WorkerError> {
    match mgr.met.fetch_snapshot() {
        Ok(snapshot) => {
            info!(
                "Forecast updated, {} forecast entries, fetched at {}",
                snapshot.forecast.len(),
                snapshot.fetched_at
            );
            state.render(Ok(&snapshot));
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            state.render(Err(&e));
        }
    }

    publish(state, files)
}

/// Writes the render state as a JSON document for the display surface to pick
/// up, replacing the previous document in full
///
/// # Arguments
///
/// * 'state' - render state to publish
/// * 'files' - files config
fn publish(state: &RenderState, files: &Files) -> Result<(), WorkerError> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| WorkerError::PublishError(format!("error serializing render state: {}", e)))?;

    fs::write(&files.display_path, json)
        .map_err(|e| WorkerError::PublishError(format!("error writing render state: {}", e)))?;

    Ok(())
}

/// Error depicting errors that occur while running a tick
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while publishing render state: {0}")]
    PublishError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_replaces_the_display_document_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");
        let files = Files {
            display_path: path.to_str().unwrap().to_string(),
        };

        let mut state = RenderState::new();
        publish(&state, &files).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        state.temperature = "21.0°C".to_string();
        state.current_visible = true;
        publish(&state, &files).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_ne!(first, second);
        assert!(second.contains("21.0°C"));
    }

    #[test]
    fn publish_to_an_impossible_path_is_an_error() {
        let files = Files {
            display_path: "/nonexistent/dir/panel.json".to_string(),
        };

        let state = RenderState::new();
        assert!(matches!(
            publish(&state, &files),
            Err(WorkerError::PublishError(_))
        ));
    }
}
