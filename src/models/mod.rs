pub mod filter;
pub mod weather;
pub mod window;

pub use filter::{CitySelection, DateRange, FilterCriteria};
pub use weather::{parse_record_date, WeatherRecord, WeatherRecordBuilder};
pub use window::VisibleRange;
