use std::time::{Duration, Instant};
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use thiserror::Error;

/// Time between fetch cycles
pub const FETCH_INTERVAL: Duration = Duration::from_secs(600);

/// Outcome of waiting on the ticker
#[derive(Debug, PartialEq, Eq)]
pub enum Tick {
    Fire,
    Stop,
}

/// Cancellation handle for a Ticker. Tripping it makes the owning loop wind
/// down after the tick currently in progress.
#[derive(Clone)]
pub struct StopHandle {
    stop: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // A full channel means a stop is already pending
        let _ = self.stop.try_send(());
    }
}

/// Repeating interval ticker with cooperative cancellation. The tick channel
/// holds at most one pending tick, so ticks coalesce behind a slow fetch
/// instead of queueing up.
pub struct Ticker {
    ticks: Receiver<Instant>,
    stop: Receiver<()>,
}

impl Ticker {
    /// Returns a ticker together with its stop handle
    ///
    /// # Arguments
    ///
    /// * 'interval' - time between ticks
    pub fn new(interval: Duration) -> (Ticker, StopHandle) {
        let (stop_tx, stop_rx) = bounded(1);
        let ticker = Ticker {
            ticks: tick(interval),
            stop: stop_rx,
        };

        (ticker, StopHandle { stop: stop_tx })
    }

    /// Returns a ticker whose stop handle is tripped by Ctrl-C
    ///
    /// # Arguments
    ///
    /// * 'interval' - time between ticks
    pub fn with_ctrlc_handler(interval: Duration) -> Result<Ticker, TickerError> {
        let (ticker, handle) = Ticker::new(interval);
        ctrlc::set_handler(move || handle.stop())?;

        Ok(ticker)
    }

    /// Blocks until the next tick fires or the ticker is stopped. A pending
    /// stop wins over a pending tick.
    pub fn wait(&self) -> Tick {
        if self.stop.try_recv().is_ok() {
            return Tick::Stop;
        }

        select! {
            recv(self.stop) -> _ => Tick::Stop,
            recv(self.ticks) -> msg => match msg {
                Ok(_) => Tick::Fire,
                Err(_) => Tick::Stop,
            },
        }
    }
}

/// Error depicting errors that occur while setting up the ticker
///
#[derive(Debug, Error)]
pub enum TickerError {
    #[error("CtrlcError: {0}")]
    CtrlcError(#[from] ctrlc::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_the_interval() {
        let (ticker, _handle) = Ticker::new(Duration::from_millis(5));
        assert_eq!(ticker.wait(), Tick::Fire);
    }

    #[test]
    fn stop_ends_the_wait() {
        let (ticker, handle) = Ticker::new(Duration::from_secs(3600));
        handle.stop();
        assert_eq!(ticker.wait(), Tick::Stop);
    }

    #[test]
    fn stop_wins_over_a_pending_tick() {
        let (ticker, handle) = Ticker::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(20));
        handle.stop();
        assert_eq!(ticker.wait(), Tick::Stop);
    }

    #[test]
    fn stopping_twice_is_harmless() {
        let (ticker, handle) = Ticker::new(Duration::from_secs(3600));
        handle.stop();
        handle.stop();
        assert_eq!(ticker.wait(), Tick::Stop);
    }
}
