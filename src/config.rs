use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::models::VisibleRange;
use crate::processors::ListViewport;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CHART_BUFFER, DEFAULT_CHART_MARGIN, DEFAULT_DATA_PATH,
    DEFAULT_LIST_HEIGHT, DEFAULT_ROW_HEIGHT, DEFAULT_VISIBLE_END, DEFAULT_VISIBLE_START,
};

/// Dashboard settings.
///
/// Layered from built-in defaults, an optional TOML file and
/// `WEATHER_DASHBOARD_*` environment variables, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,

    /// Rows added on each side of the visible window before charting
    #[validate(range(max = 100_000))]
    pub chart_buffer: usize,

    #[validate(range(min = 1))]
    pub list_height: u32,

    #[validate(range(min = 1))]
    pub row_height: u32,

    pub chart_margin: u32,

    pub initial_visible_start: i64,
    pub initial_visible_end: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            chart_buffer: DEFAULT_CHART_BUFFER,
            list_height: DEFAULT_LIST_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            chart_margin: DEFAULT_CHART_MARGIN,
            initial_visible_start: DEFAULT_VISIBLE_START,
            initial_visible_end: DEFAULT_VISIBLE_END,
        }
    }
}

impl DashboardConfig {
    /// Load settings. A missing file is not an error; a malformed one is.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn initial_visible_range(&self) -> VisibleRange {
        VisibleRange::new(self.initial_visible_start, self.initial_visible_end)
    }

    pub fn list_viewport(&self) -> ListViewport {
        ListViewport::new(self.list_height, self.row_height)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
}
