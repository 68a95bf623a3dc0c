mod models;

use std::time::Duration;
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::Config;
use crate::manager_met::models::{ForecastDocument, TimeseriesEntry};
use crate::models::{Observation, WeatherSnapshot};

/// Number of timeseries entries shown in the forecast list
pub const FORECAST_LEN: usize = 8;

/// Struct for managing fetches from the MET locationforecast service
pub struct Met {
    client: Client,
    base_url: String,
    lat: f64,
    long: f64,
}

impl Met {
    /// Returns a Met struct ready for fetching weather forecasts
    ///
    /// # Arguments
    ///
    /// * 'config' - configuration to use
    pub fn new(config: &Config) -> Result<Met, MetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Met {
            client,
            base_url: config.met.base_url.clone(),
            lat: config.geo_ref.lat,
            long: config.geo_ref.long,
        })
    }

    /// Fetches a fresh forecast document and reduces it to the current
    /// observation plus the near term forecast list
    pub fn fetch_snapshot(&self) -> Result<WeatherSnapshot, MetError> {
        let document = self.fetch_document()?;
        Self::select(document)
    }

    /// Performs one GET against the forecast endpoint and parses the body.
    ///
    /// The upstream wants an identifying User-Agent header. None is sent here;
    /// deployments where the upstream enforces it see MetError::BlockedError
    /// and need a proxy that adds the header.
    fn fetch_document(&self) -> Result<ForecastDocument, MetError> {
        let lat = self.lat.to_string();
        let long = self.long.to_string();

        let response = self.client
            .get(&self.base_url)
            .query(&vec![("lat", lat.as_str()), ("lon", long.as_str())])
            .send()?;

        classify_status(response.status())?;

        let json = response.text()?;
        let document: ForecastDocument = serde_json::from_str(&json)
            .map_err(|e| MetError::DocumentError(e.to_string()))?;

        Ok(document)
    }

    /// Reduces a forecast document to a snapshot: the first timeseries entry
    /// becomes the current observation and the first eight entries, in
    /// upstream order, become the forecast list
    ///
    /// # Arguments
    ///
    /// * 'document' - parsed forecast document
    fn select(document: ForecastDocument) -> Result<WeatherSnapshot, MetError> {
        let entries = document.properties.timeseries;
        if entries.is_empty() {
            return Err(MetError::EmptyTimeseriesError);
        }

        let forecast: Vec<Observation> = entries
            .iter()
            .take(FORECAST_LEN)
            .map(observation)
            .collect();
        let current = observation(&entries[0]);

        Ok(WeatherSnapshot {
            fetched_at: Utc::now(),
            current,
            forecast,
        })
    }
}

/// Maps one raw timeseries entry to a domain observation
///
/// # Arguments
///
/// * 'entry' - raw timeseries entry from the forecast document
fn observation(entry: &TimeseriesEntry) -> Observation {
    let details = &entry.data.instant.details;

    Observation {
        valid_time: entry.time,
        air_temperature: details.air_temperature,
        air_pressure_at_sea_level: details.air_pressure_at_sea_level,
        wind_speed: details.wind_speed,
        symbol: entry.symbol_code().to_string(),
    }
}

/// Splits response statuses into accepted, blocked by the upstream and plain
/// HTTP failures
///
/// # Arguments
///
/// * 'status' - HTTP status of the response
fn classify_status(status: StatusCode) -> Result<(), MetError> {
    if status.is_success() {
        return Ok(());
    }

    match status.as_u16() {
        401 | 403 => Err(MetError::BlockedError(status.as_u16())),
        code => Err(MetError::StatusError(code)),
    }
}

#[derive(Error, Debug)]
pub enum MetError {
    #[error("BlockedError: upstream rejected the request with HTTP {0}")]
    BlockedError(u16),
    #[error("StatusError: HTTP {0}")]
    StatusError(u16),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("DocumentError: {0}")]
    DocumentError(String),
    #[error("EmptyTimeseriesError")]
    EmptyTimeseriesError,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> ForecastDocument {
        serde_json::from_str(json).unwrap()
    }

    fn entry_json(temperature: f64) -> String {
        format!(
            r#"{{"time": "2026-02-01T12:00:00Z", "data": {{"instant": {{"details": {{"air_temperature": {temperature}}}}}}}}}"#
        )
    }

    #[test]
    fn select_signals_no_data_for_missing_or_empty_timeseries() {
        let empty = document(r#"{"properties": {"timeseries": []}}"#);
        assert!(matches!(Met::select(empty), Err(MetError::EmptyTimeseriesError)));

        let missing = document(r#"{"type": "Feature"}"#);
        assert!(matches!(Met::select(missing), Err(MetError::EmptyTimeseriesError)));
    }

    #[test]
    fn select_takes_the_first_eight_entries_in_order() {
        let entries: Vec<String> = (0..10).map(|i| entry_json(i as f64)).collect();
        let json = format!(r#"{{"properties": {{"timeseries": [{}]}}}}"#, entries.join(","));

        let snapshot = Met::select(document(&json)).unwrap();

        assert_eq!(snapshot.forecast.len(), FORECAST_LEN);
        assert_eq!(snapshot.current.air_temperature, Some(0.0));
        for (i, o) in snapshot.forecast.iter().enumerate() {
            assert_eq!(o.air_temperature, Some(i as f64));
        }
    }

    #[test]
    fn select_keeps_short_timeseries_as_is() {
        let json = format!(r#"{{"properties": {{"timeseries": [{}]}}}}"#, entry_json(3.5));

        let snapshot = Met::select(document(&json)).unwrap();

        assert_eq!(snapshot.forecast.len(), 1);
        assert_eq!(snapshot.current.air_temperature, Some(3.5));
    }

    #[test]
    fn entry_with_no_details_becomes_an_empty_observation() {
        let json = r#"{"properties": {"timeseries": [{}]}}"#;

        let snapshot = Met::select(document(json)).unwrap();

        assert!(snapshot.current.valid_time.is_none());
        assert!(snapshot.current.air_temperature.is_none());
        assert!(snapshot.current.air_pressure_at_sea_level.is_none());
        assert!(snapshot.current.wind_speed.is_none());
        assert_eq!(snapshot.current.symbol, "");
    }

    #[test]
    fn symbol_prefers_the_one_hour_summary() {
        let json = r#"{"properties": {"timeseries": [
            {"data": {
                "next_1_hours": {"summary": {"symbol_code": "clearsky_day"}},
                "next_6_hours": {"summary": {"symbol_code": "heavyrain"}}
            }}
        ]}}"#;

        let snapshot = Met::select(document(json)).unwrap();
        assert_eq!(snapshot.current.symbol, "clearsky_day");
    }

    #[test]
    fn symbol_falls_back_to_the_six_hour_summary() {
        let json = r#"{"properties": {"timeseries": [
            {"data": {"next_6_hours": {"summary": {"symbol_code": "heavyrain"}}}}
        ]}}"#;

        let snapshot = Met::select(document(json)).unwrap();
        assert_eq!(snapshot.current.symbol, "heavyrain");
    }

    #[test]
    fn symbol_falls_through_a_one_hour_summary_without_code() {
        let json = r#"{"properties": {"timeseries": [
            {"data": {
                "next_1_hours": {"summary": {}},
                "next_6_hours": {"summary": {"symbol_code": "fog"}}
            }}
        ]}}"#;

        let snapshot = Met::select(document(json)).unwrap();
        assert_eq!(snapshot.current.symbol, "fog");
    }

    #[test]
    fn classify_status_splits_blocked_from_plain_failures() {
        assert!(classify_status(StatusCode::OK).is_ok());
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED),
            Err(MetError::BlockedError(401))
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN),
            Err(MetError::BlockedError(403))
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(MetError::StatusError(500))
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Err(MetError::StatusError(404))
        ));
    }
}
