use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::WeatherRecord;
use crate::utils::constants::CSV_HEADERS;

/// CSV row layout matching the input file's column names.
#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "Temperature")]
    temperature: f64,
    #[serde(rename = "Precipitation")]
    precipitation: f64,
    #[serde(rename = "Wind Speed")]
    wind_speed: f64,
    #[serde(rename = "Humidity")]
    humidity: f64,
}

impl<'a> From<&'a WeatherRecord> for CsvRow<'a> {
    fn from(record: &'a WeatherRecord) -> Self {
        Self {
            date: &record.date,
            city: &record.city,
            temperature: record.temperature,
            precipitation: record.precipitation,
            wind_speed: record.wind_speed,
            humidity: record.humidity,
        }
    }
}

pub fn write_csv_to<W: Write>(records: &[WeatherRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv_to(records, BufWriter::new(file))
}

pub fn write_json_to<W: Write>(records: &[WeatherRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

pub fn write_json(records: &[WeatherRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_json_to(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}
