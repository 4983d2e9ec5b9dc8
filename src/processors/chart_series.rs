use serde::Serialize;

use crate::models::WeatherRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartStyle {
    Line,
    Bar,
    Area,
    Scatter,
}

/// The five dashboard charts. All of them plot the same record window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    Temperature,
    Precipitation,
    WindSpeed,
    Humidity,
    TemperatureVsHumidity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Temperature,
        ChartKind::Precipitation,
        ChartKind::WindSpeed,
        ChartKind::Humidity,
        ChartKind::TemperatureVsHumidity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Temperature => "Temperature",
            ChartKind::Precipitation => "Precipitation",
            ChartKind::WindSpeed => "Wind Speed",
            ChartKind::Humidity => "Humidity",
            ChartKind::TemperatureVsHumidity => "Temperature vs Humidity",
        }
    }

    pub fn style(&self) -> ChartStyle {
        match self {
            ChartKind::Temperature | ChartKind::WindSpeed => ChartStyle::Line,
            ChartKind::Precipitation => ChartStyle::Bar,
            ChartKind::Humidity => ChartStyle::Area,
            ChartKind::TemperatureVsHumidity => ChartStyle::Scatter,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ChartKind::Temperature => "°C",
            ChartKind::Precipitation => "mm",
            ChartKind::WindSpeed => "km/h",
            ChartKind::Humidity | ChartKind::TemperatureVsHumidity => "%",
        }
    }

    /// Y value of a time-series chart. `None` for the scatter chart.
    fn series_value(&self, record: &WeatherRecord) -> Option<f64> {
        match self {
            ChartKind::Temperature => Some(record.temperature),
            ChartKind::Precipitation => Some(record.precipitation),
            ChartKind::WindSpeed => Some(record.wind_speed),
            ChartKind::Humidity => Some(record.humidity),
            ChartKind::TemperatureVsHumidity => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Dated { date: String, value: f64 },
    Xy { x: f64, y: f64 },
}

impl ChartPoint {
    pub fn y(&self) -> f64 {
        match self {
            ChartPoint::Dated { value, .. } => *value,
            ChartPoint::Xy { y, .. } => *y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Project a record window onto the fields `kind` plots.
    pub fn from_window(kind: ChartKind, window: &[WeatherRecord]) -> Self {
        let points = window
            .iter()
            .map(|record| match kind.series_value(record) {
                Some(value) => ChartPoint::Dated {
                    date: record.date.clone(),
                    value,
                },
                None => ChartPoint::Xy {
                    x: record.temperature,
                    y: record.humidity,
                },
            })
            .collect();

        Self { kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest y value, ignoring non-finite points.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(ChartPoint::y)
            .filter(|y| y.is_finite())
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}
