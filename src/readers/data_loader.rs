use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::Result;
use crate::models::WeatherRecord;
use crate::readers::csv_loader::parse_weather_bytes;
use crate::store::SharedStore;

/// Loads the observation file once and publishes it to the store.
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file without touching any store.
    pub async fn fetch_records(&self) -> Result<Vec<WeatherRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_weather_bytes(&bytes)
    }

    /// Load the file into `store` with a single replace.
    ///
    /// On failure the dataset stays as it was, the store moves to
    /// `LoadState::Failed` and the error is returned.
    pub async fn load(&self, store: &SharedStore) -> Result<usize> {
        store.borrow_mut().mark_loading();
        info!("Loading weather data from {}", self.path.display());

        match self.fetch_records().await {
            Ok(records) => {
                let count = records.len();
                store.borrow_mut().replace(records);
                info!("Loaded {} records", count);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to load {}: {}", self.path.display(), e);
                store.borrow_mut().mark_failed(e.to_string());
                Err(e)
            }
        }
    }
}
