use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::models::WeatherRecord;
use crate::utils::constants::{
    COL_CITY, COL_DATE, COL_HUMIDITY, COL_PRECIPITATION, COL_TEMPERATURE, COL_WIND_SPEED,
};

/// Parse a numeric cell, never failing.
///
/// Surrounding whitespace is ignored and the longest leading decimal number is
/// used, so `"12.5mm"` reads as 12.5. Cells with no numeric prefix (including
/// empty cells) and `NaN` read as 0. `Infinity` is accepted.
///
/// Lenient ingestion is part of the loader's contract: a bad cell costs one
/// value, never the row or the file.
pub fn parse_lenient_f64(text: &str) -> f64 {
    match numeric_prefix(text.trim()).parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Longest prefix of `text` shaped like a decimal float literal.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return &text[..end + "Infinity".len()];
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

/// Positions of the known columns in a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    city: usize,
    temperature: Option<usize>,
    precipitation: Option<usize>,
    wind_speed: Option<usize>,
    humidity: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let date = find(COL_DATE).ok_or_else(|| DashboardError::MissingColumn(COL_DATE.to_string()))?;
        let city = find(COL_CITY).ok_or_else(|| DashboardError::MissingColumn(COL_CITY.to_string()))?;

        let numeric = |name: &str| {
            let index = find(name);
            if index.is_none() {
                warn!("Column '{}' not found, values default to 0", name);
            }
            index
        };

        Ok(Self {
            date,
            city,
            temperature: numeric(COL_TEMPERATURE),
            precipitation: numeric(COL_PRECIPITATION),
            wind_speed: numeric(COL_WIND_SPEED),
            humidity: numeric(COL_HUMIDITY),
        })
    }

    fn record(&self, row: &StringRecord) -> WeatherRecord {
        let text = |index: usize| row.get(index).unwrap_or("");
        let number = |index: Option<usize>| index.map_or(0.0, |i| parse_lenient_f64(text(i)));

        WeatherRecord::new(
            text(self.date).to_string(),
            text(self.city).to_string(),
            number(self.temperature),
            number(self.precipitation),
            number(self.wind_speed),
            number(self.humidity),
        )
    }
}

/// Parse comma-delimited weather observations with a header row.
///
/// Rows shorter than the header are accepted; their missing cells read as
/// empty text. A missing `Date` or `City` header is an error.
pub fn parse_weather_csv(text: &str) -> Result<Vec<WeatherRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?)?;
    let mut records = Vec::new();

    for row in reader.records() {
        records.push(columns.record(&row?));
    }

    debug!("Parsed {} weather records", records.len());
    Ok(records)
}

/// Decode raw file bytes (UTF-8, or UTF-16 when a BOM says so) and parse them.
pub fn parse_weather_bytes(bytes: &[u8]) -> Result<Vec<WeatherRecord>> {
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        warn!(
            "Input contained invalid {} sequences; replaced with U+FFFD",
            encoding.name()
        );
    }
    parse_weather_csv(&text)
}
