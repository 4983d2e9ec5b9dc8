use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::utils::constants::DATE_FORMAT;

/// One daily observation for a city.
///
/// `date` is kept as the source text. Zero-padded `YYYY-MM-DD` strings compare
/// lexically in chronological order, which the date-range filter relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub date: String,
    pub city: String,
    pub temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub humidity: f64,
}

impl WeatherRecord {
    pub fn new(
        date: String,
        city: String,
        temperature: f64,
        precipitation: f64,
        wind_speed: f64,
        humidity: f64,
    ) -> Self {
        Self {
            date,
            city,
            temperature,
            precipitation,
            wind_speed,
            humidity,
        }
    }

    pub fn builder() -> WeatherRecordBuilder {
        WeatherRecordBuilder::new()
    }

    /// Calendar date used for ordering. `None` when the text is not a date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    pub fn matches_city(&self, city: &str) -> bool {
        self.city == city
    }

    /// Inclusive lexical range check on the stored date text.
    pub fn within_dates(&self, start: &str, end: &str) -> bool {
        self.date.as_str() >= start && self.date.as_str() <= end
    }
}

/// Parse a record date, accepting plain `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_record_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[derive(Default)]
pub struct WeatherRecordBuilder {
    date: Option<String>,
    city: Option<String>,
    temperature: f64,
    precipitation: f64,
    wind_speed: f64,
    humidity: f64,
}

impl WeatherRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the date from a calendar value, formatted the way the loader stores it.
    pub fn naive_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format(DATE_FORMAT).to_string());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = precipitation;
        self
    }

    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = humidity;
        self
    }

    pub fn build(self) -> Result<WeatherRecord> {
        let date = self
            .date
            .ok_or_else(|| DashboardError::InvalidFormat("date is required".to_string()))?;
        let city = self
            .city
            .ok_or_else(|| DashboardError::InvalidFormat("city is required".to_string()))?;

        Ok(WeatherRecord::new(
            date,
            city,
            self.temperature,
            self.precipitation,
            self.wind_speed,
            self.humidity,
        ))
    }
}
