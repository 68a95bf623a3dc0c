use anyhow::Result;
use log::{error, info};
use crate::errors::PanelError;
use crate::initialization::init;
use crate::render::RenderState;
use crate::scheduler::{FETCH_INTERVAL, Tick, Ticker};
use crate::worker::run_tick;

mod config;
mod errors;
mod initialization;
mod logging;
mod manager_met;
pub mod models;
mod render;
mod scheduler;
mod worker;

fn main() -> Result<()> {
    // Load config and set up the managers. If initialization fails, we are pretty much out of luck
    // and can't even log.
    let (config, mgr) = match init() {
        Ok((c, m)) => (c, m),
        Err(e) => {
            return Err(PanelError(format!("Initialization failed: {}", e)))?;
        }
    };

    let ticker = Ticker::with_ctrlc_handler(FETCH_INTERVAL)
        .map_err(|e| PanelError(format!("Installing shutdown handler failed: {}", e)))?;

    let mut state = RenderState::new();

    // One tick right away, then one per interval until stopped
    if let Err(e) = run_tick(&mgr, &mut state, &config.files) {
        error!("Tick failed: {}", e);
    }
    loop {
        match ticker.wait() {
            Tick::Fire => {
                if let Err(e) = run_tick(&mgr, &mut state, &config.files) {
                    error!("Tick failed: {}", e);
                }
            }
            Tick::Stop => break,
        }
    }

    info!("shutting down");
    Ok(())
}
