pub mod chart_series;
pub mod filter_engine;
pub mod window_provider;

pub use chart_series::{ChartKind, ChartPoint, ChartSeries, ChartStyle};
pub use filter_engine::{city_options, compute_filtered_view};
pub use window_provider::{compute_chart_window, format_row, row_at, ListViewport};
