pub mod export;
pub mod generator;

pub use export::{write_csv, write_csv_to, write_json, write_json_to};
pub use generator::SampleGenerator;
