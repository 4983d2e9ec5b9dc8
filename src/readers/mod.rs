pub mod csv_loader;
pub mod data_loader;

pub use csv_loader::{parse_lenient_f64, parse_weather_bytes, parse_weather_csv};
pub use data_loader::DataLoader;
