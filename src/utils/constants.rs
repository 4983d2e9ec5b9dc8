/// City selector sentinel meaning "no city filter"
pub const ALL_CITIES: &str = "All";

/// Date text layout used by the source data
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV column names
pub const COL_DATE: &str = "Date";
pub const COL_CITY: &str = "City";
pub const COL_TEMPERATURE: &str = "Temperature";
pub const COL_PRECIPITATION: &str = "Precipitation";
pub const COL_WIND_SPEED: &str = "Wind Speed";
pub const COL_HUMIDITY: &str = "Humidity";

pub const CSV_HEADERS: [&str; 6] = [
    COL_DATE,
    COL_CITY,
    COL_TEMPERATURE,
    COL_PRECIPITATION,
    COL_WIND_SPEED,
    COL_HUMIDITY,
];

/// Data source defaults
pub const DEFAULT_DATA_PATH: &str = "public/weather_data.csv";
pub const DEFAULT_CONFIG_FILE: &str = "weather-dashboard.toml";
pub const CONFIG_ENV_PREFIX: &str = "WEATHER_DASHBOARD";

/// Windowing defaults
pub const DEFAULT_CHART_BUFFER: usize = 20;
pub const DEFAULT_VISIBLE_START: i64 = 0;
pub const DEFAULT_VISIBLE_END: i64 = 10;

/// List virtualization defaults (pixels)
pub const DEFAULT_LIST_HEIGHT: u32 = 300;
pub const DEFAULT_ROW_HEIGHT: u32 = 35;

/// Horizontal space reserved around each chart (pixels)
pub const DEFAULT_CHART_MARGIN: u32 = 20;
pub const DEFAULT_CONTAINER_WIDTH: u32 = 100;

/// Sample data generation
pub const DEFAULT_SAMPLE_ROWS: usize = 10_000;
pub const SAMPLE_CITIES: [&str; 5] = ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
pub const SAMPLE_START_DATE: (i32, u32, u32) = (2020, 1, 1);
pub const SAMPLE_SPAN_DAYS: i64 = 365 * 4;
pub const SAMPLE_TEMPERATURE_RANGE: (f64, f64) = (-10.0, 40.0);
pub const SAMPLE_PRECIPITATION_RANGE: (f64, f64) = (0.0, 100.0);
pub const SAMPLE_WIND_SPEED_RANGE: (f64, f64) = (0.0, 30.0);
pub const SAMPLE_HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);
