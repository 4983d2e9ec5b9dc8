use std::collections::BTreeMap;

use crate::models::WeatherRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherStatistics {
    pub total_records: usize,
    pub unique_cities: usize,
    /// Earliest and latest date text, compared lexically
    pub date_range: Option<(String, String)>,
    pub temperature: MetricStats,
    pub precipitation: MetricStats,
    pub wind_speed: MetricStats,
    pub humidity: MetricStats,
    pub city_counts: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl MetricStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for value in values.filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            count += 1;
        }

        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

impl Default for MetricStats {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
        }
    }
}

impl WeatherStatistics {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Weather Data Summary ===\n");
        summary.push_str(&format!("Records: {}\n", self.total_records));
        summary.push_str(&format!("Cities: {}\n", self.unique_cities));

        match &self.date_range {
            Some((first, last)) => summary.push_str(&format!("Date Range: {} to {}\n", first, last)),
            None => summary.push_str("Date Range: n/a\n"),
        }

        if self.total_records == 0 {
            return summary;
        }

        summary.push('\n');
        for (name, stats, unit) in [
            ("Temperature", &self.temperature, "°C"),
            ("Precipitation", &self.precipitation, "mm"),
            ("Wind Speed", &self.wind_speed, " km/h"),
            ("Humidity", &self.humidity, "%"),
        ] {
            summary.push_str(&format!(
                "{:<14} min={:.1}{unit}, avg={:.1}{unit}, max={:.1}{unit}\n",
                name,
                stats.min,
                stats.mean,
                stats.max,
                unit = unit
            ));
        }

        summary.push_str("\nRecords per City:\n");
        for (city, count) in &self.city_counts {
            summary.push_str(&format!("  {}: {}\n", city, count));
        }

        summary
    }
}

pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Descriptive statistics for a set of records. An empty input yields
    /// zero counts and zeroed metrics.
    pub fn analyze(&self, records: &[WeatherRecord]) -> WeatherStatistics {
        let mut city_counts = BTreeMap::new();
        let mut first: Option<&str> = None;
        let mut last: Option<&str> = None;

        for record in records {
            *city_counts.entry(record.city.clone()).or_insert(0) += 1;

            let date = record.date.as_str();
            if date.is_empty() {
                continue;
            }
            if first.map_or(true, |f| date < f) {
                first = Some(date);
            }
            if last.map_or(true, |l| date > l) {
                last = Some(date);
            }
        }

        let metric = |f: fn(&WeatherRecord) -> f64| {
            MetricStats::from_values(records.iter().map(f)).unwrap_or_default()
        };

        WeatherStatistics {
            total_records: records.len(),
            unique_cities: city_counts.len(),
            date_range: first.zip(last).map(|(f, l)| (f.to_string(), l.to_string())),
            temperature: metric(|r| r.temperature),
            precipitation: metric(|r| r.precipitation),
            wind_speed: metric(|r| r.wind_speed),
            humidity: metric(|r| r.humidity),
            city_counts,
        }
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
