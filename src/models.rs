use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single timestamped observation or forecast value. Every meteorological
/// field is optional; absence means the upstream did not report it.
#[derive(Clone, Serialize, Debug)]
pub struct Observation {
    pub valid_time: Option<DateTime<Utc>>,
    pub air_temperature: Option<f64>,
    pub air_pressure_at_sea_level: Option<f64>,
    pub wind_speed: Option<f64>,
    pub symbol: String,
}

/// One fetch cycle worth of weather data
#[derive(Clone, Serialize, Debug)]
pub struct WeatherSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub current: Observation,
    pub forecast: Vec<Observation>,
}
