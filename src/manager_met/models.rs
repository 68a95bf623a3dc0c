use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Subset of the MET locationforecast compact document. Everything below the
/// top level tolerates absence; missing leaves deserialize to None or empty.
#[derive(Deserialize, Debug, Default)]
pub struct ForecastDocument {
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Deserialize, Debug, Default)]
pub struct Properties {
    #[serde(default)]
    pub timeseries: Vec<TimeseriesEntry>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TimeseriesEntry {
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: EntryData,
}

#[derive(Deserialize, Debug, Default)]
pub struct EntryData {
    #[serde(default)]
    pub instant: Instant,
    pub next_1_hours: Option<NextHours>,
    pub next_6_hours: Option<NextHours>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Instant {
    #[serde(default)]
    pub details: InstantDetails,
}

#[derive(Deserialize, Debug, Default)]
pub struct InstantDetails {
    pub air_temperature: Option<f64>,
    pub air_pressure_at_sea_level: Option<f64>,
    pub wind_speed: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NextHours {
    pub summary: Option<Summary>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Summary {
    pub symbol_code: Option<String>,
}

impl TimeseriesEntry {
    /// Resolves the sky condition code for the entry, preferring the one hour
    /// summary over the six hour summary. Empty when neither carries a code.
    pub fn symbol_code(&self) -> &str {
        summary_code(self.data.next_1_hours.as_ref())
            .or_else(|| summary_code(self.data.next_6_hours.as_ref()))
            .unwrap_or("")
    }
}

fn summary_code(next: Option<&NextHours>) -> Option<&str> {
    next.and_then(|n| n.summary.as_ref())
        .and_then(|s| s.symbol_code.as_deref())
}
