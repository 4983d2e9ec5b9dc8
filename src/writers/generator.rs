use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::models::WeatherRecord;
use crate::utils::constants::{
    DATE_FORMAT, SAMPLE_CITIES, SAMPLE_HUMIDITY_RANGE, SAMPLE_PRECIPITATION_RANGE, SAMPLE_SPAN_DAYS,
    SAMPLE_START_DATE, SAMPLE_TEMPERATURE_RANGE, SAMPLE_WIND_SPEED_RANGE,
};
use crate::utils::ProgressReporter;
use crate::writers::export::write_csv;

/// Random observations for demos and benchmarks.
///
/// Dates fall uniformly within four years of 2020-01-01, cities are drawn
/// from a fixed list and every metric is uniform over its range, rounded to
/// one decimal place. Rows are not sorted.
pub struct SampleGenerator {
    rng: StdRng,
    cities: Vec<String>,
    start_date: NaiveDate,
}

impl SampleGenerator {
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let (year, month, day) = SAMPLE_START_DATE;
        let start_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DashboardError::Config("invalid sample start date".to_string()))?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            rng,
            cities: SAMPLE_CITIES.iter().map(|c| c.to_string()).collect(),
            start_date,
        })
    }

    pub fn with_cities(mut self, cities: Vec<String>) -> Result<Self> {
        if cities.is_empty() {
            return Err(DashboardError::Config(
                "at least one city is required".to_string(),
            ));
        }
        self.cities = cities;
        Ok(self)
    }

    pub fn next_record(&mut self) -> WeatherRecord {
        let offset = self.rng.random_range(0..=SAMPLE_SPAN_DAYS);
        let date = self.start_date + Duration::days(offset);
        let city = self.cities[self.rng.random_range(0..self.cities.len())].clone();

        let temperature = self.uniform(SAMPLE_TEMPERATURE_RANGE);
        let precipitation = self.uniform(SAMPLE_PRECIPITATION_RANGE);
        let wind_speed = self.uniform(SAMPLE_WIND_SPEED_RANGE);
        let humidity = self.uniform(SAMPLE_HUMIDITY_RANGE);

        WeatherRecord::new(
            date.format(DATE_FORMAT).to_string(),
            city,
            temperature,
            precipitation,
            wind_speed,
            humidity,
        )
    }

    pub fn generate(&mut self, count: usize) -> Vec<WeatherRecord> {
        (0..count).map(|_| self.next_record()).collect()
    }

    /// Generate `count` rows and write them as CSV to `path`.
    pub fn write_file(&mut self, path: &Path, count: usize, progress: Option<&ProgressReporter>) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.next_record());
            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        write_csv(&records, path)?;
        info!("Wrote {} sample records to {}", count, path.display());
        Ok(())
    }

    fn uniform(&mut self, (low, high): (f64, f64)) -> f64 {
        let value = self.rng.random_range(low..=high);
        (value * 10.0).round() / 10.0
    }
}
