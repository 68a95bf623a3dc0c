use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use crate::manager_met::MetError;
use crate::models::{Observation, WeatherSnapshot};

/// Placeholder shown for values the upstream did not report
const PLACEHOLDER: &str = "—";

/// One line in the rendered forecast list
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastItem {
    pub time: String,
    pub symbol: String,
    pub temperature: String,
}

/// Display state for the panel. All values are preformatted strings; the
/// display surface shows them verbatim and uses the visible flags to show
/// or hide its regions.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RenderState {
    pub current_visible: bool,
    pub temperature: String,
    pub pressure: String,
    pub wind: String,
    pub observed_at: String,
    pub forecast_visible: bool,
    pub forecast: Vec<ForecastItem>,
    pub error_visible: bool,
    pub error: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RenderState {
    /// Returns a render state with everything hidden and all slots on their
    /// placeholder values
    pub fn new() -> RenderState {
        RenderState {
            current_visible: false,
            temperature: PLACEHOLDER.to_string(),
            pressure: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            observed_at: PLACEHOLDER.to_string(),
            forecast_visible: false,
            forecast: Vec::new(),
            error_visible: false,
            error: String::new(),
            updated_at: None,
        }
    }

    /// Applies one tick outcome. Success replaces the data regions in full and
    /// hides the error banner; failure only raises the banner and leaves
    /// whatever data was rendered before untouched.
    ///
    /// # Arguments
    ///
    /// * 'outcome' - snapshot or classified error from the fetch cycle
    pub fn render(&mut self, outcome: Result<&WeatherSnapshot, &MetError>) {
        match outcome {
            Ok(snapshot) => self.render_snapshot(snapshot),
            Err(e) => self.render_error(e),
        }
    }

    fn render_snapshot(&mut self, snapshot: &WeatherSnapshot) {
        self.temperature = format_temperature(snapshot.current.air_temperature);
        self.pressure = format_pressure(snapshot.current.air_pressure_at_sea_level);
        self.wind = format_wind(snapshot.current.wind_speed);
        self.observed_at = format_date_time(snapshot.current.valid_time);
        self.current_visible = true;

        // The list is rebuilt from scratch, never patched in place
        self.forecast = snapshot.forecast.iter().map(forecast_item).collect();
        self.forecast_visible = true;

        self.error.clear();
        self.error_visible = false;
        self.updated_at = Some(snapshot.fetched_at);
    }

    fn render_error(&mut self, e: &MetError) {
        self.error = user_message(e);
        self.error_visible = true;
    }
}

/// Maps one observation to a rendered forecast line
///
/// # Arguments
///
/// * 'observation' - observation to render
fn forecast_item(observation: &Observation) -> ForecastItem {
    ForecastItem {
        time: format_time_of_day(observation.valid_time),
        symbol: observation.symbol.replace('_', " "),
        temperature: format_temperature(observation.air_temperature),
    }
}

/// Maps a classified error to the message shown in the banner. The wording
/// stays free of technical detail; the log carries the original error.
///
/// # Arguments
///
/// * 'e' - classified error from the fetch cycle
fn user_message(e: &MetError) -> String {
    match e {
        MetError::BlockedError(status) => format!(
            "The weather service rejected the request (HTTP {}). It requires an \
             identifying User-Agent header this client does not send; deploy \
             behind a proxy that adds one.",
            status
        ),
        MetError::StatusError(status) => {
            format!("The weather service answered with HTTP {}.", status)
        }
        MetError::NetworkError(_) => {
            "Could not reach the weather service. The network may be down.".to_string()
        }
        MetError::DocumentError(_) => {
            "The weather service answered with an unreadable document.".to_string()
        }
        MetError::EmptyTimeseriesError => "No timeseries data available.".to_string(),
    }
}

fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{:.1}°C", t),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_pressure(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{:.0} hPa", p),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_wind(value: Option<f64>) -> String {
    match value {
        Some(w) => format!("{:.1} m/s", w),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_date_time(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_time_of_day(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.with_timezone(&Local).format("%H:%M").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}
