//! Composition root tying the store, the filter engine and the window
//! provider together.
//!
//! The dashboard owns every piece of mutable session state: the selected
//! city, the date range, the single visible window that all charts share and
//! the shared chart width. Derived data (filtered view, city options) is
//! recomputed from the full dataset whenever one of its inputs changes.

use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::config::DashboardConfig;
use crate::models::{CitySelection, DateRange, FilterCriteria, VisibleRange, WeatherRecord};
use crate::processors::{
    city_options, compute_chart_window, compute_filtered_view, format_row, row_at, ChartKind,
    ChartSeries, ListViewport,
};
use crate::store::{LoadState, SharedStore, StoreEvent, SubscriptionId};

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub index: usize,
    pub cells: [String; 6],
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardFrame {
    pub cities: Vec<String>,
    pub selected_city: String,
    pub start_date: String,
    pub end_date: String,
    pub charts: Vec<ChartSeries>,
    pub chart_width: u32,
    pub total_rows: usize,
    pub visible_rows: Vec<ListRow>,
    pub error: Option<String>,
}

pub struct Dashboard {
    store: SharedStore,
    subscription: Option<SubscriptionId>,
    dataset_changed: Rc<Cell<bool>>,
    criteria: FilterCriteria,
    visible_range: VisibleRange,
    chart_buffer: usize,
    chart_margin: u32,
    chart_width: u32,
    viewport: ListViewport,
    scroll_offset: u64,
    filtered: Vec<WeatherRecord>,
    cities: Vec<CitySelection>,
    criteria_changed: bool,
}

impl Dashboard {
    pub fn new(store: SharedStore, config: &DashboardConfig) -> Self {
        let dataset_changed = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dataset_changed);
        let subscription = store.borrow_mut().subscribe(move |event| {
            if matches!(event, StoreEvent::Replaced { .. }) {
                flag.set(true);
            }
        });

        Self {
            store,
            subscription: Some(subscription),
            dataset_changed,
            criteria: FilterCriteria::default(),
            visible_range: config.initial_visible_range(),
            chart_buffer: config.chart_buffer,
            chart_margin: config.chart_margin,
            chart_width: 0,
            viewport: config.list_viewport(),
            scroll_offset: 0,
            filtered: Vec::new(),
            cities: vec![CitySelection::All],
            criteria_changed: true,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    pub fn chart_width(&self) -> u32 {
        self.chart_width
    }

    pub fn load_state(&self) -> LoadState {
        self.store.borrow().load_state().clone()
    }

    pub fn set_city(&mut self, city: CitySelection) {
        if self.criteria.city != city {
            debug!("City filter set to {}", city);
            self.criteria.city = city;
            self.criteria_changed = true;
        }
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        if self.criteria.date_range != date_range {
            debug!(
                "Date range set to [{}, {}]",
                date_range.start_str(),
                date_range.end_str()
            );
            self.criteria.date_range = date_range;
            self.criteria_changed = true;
        }
    }

    pub fn set_start_date(&mut self, start: Option<String>) {
        let range = DateRange::new(start, self.criteria.date_range.end.clone());
        self.set_date_range(range);
    }

    pub fn set_end_date(&mut self, end: Option<String>) {
        let range = DateRange::new(self.criteria.date_range.start.clone(), end);
        self.set_date_range(range);
    }

    /// List callback: rows `start_index..=stop_index` are on screen.
    pub fn on_visible_range_change(&mut self, start_index: usize, stop_index: usize) {
        let to_i64 = |i: usize| i64::try_from(i).unwrap_or(i64::MAX);
        self.visible_range = VisibleRange::new(
            to_i64(start_index),
            to_i64(stop_index).saturating_add(1),
        );
        trace!(start = start_index, stop = stop_index, "Visible range changed");
    }

    /// Scroll the list and feed the new visible rows back to the charts.
    pub fn scroll_to(&mut self, offset: u64) {
        self.refresh();
        self.scroll_offset = offset.min(self.viewport.max_scroll_offset(self.filtered.len()));
        self.sync_visible_range();
    }

    pub fn scroll_to_row(&mut self, index: usize) {
        self.scroll_to(self.viewport.offset_for_index(index));
    }

    /// Container resize: every chart shares one width.
    pub fn on_resize(&mut self, container_width: u32) {
        self.chart_width = container_width.saturating_sub(self.chart_margin);
        debug!(container_width, chart_width = self.chart_width, "Chart width updated");
    }

    /// Recompute derived state if the dataset or the criteria changed.
    /// Returns `true` when a recomputation happened.
    pub fn refresh(&mut self) -> bool {
        let dataset_changed = self.dataset_changed.replace(false);
        if !dataset_changed && !self.criteria_changed {
            return false;
        }

        let records = self.store.borrow().records();
        if dataset_changed {
            self.cities = city_options(&records);
        }
        self.filtered = compute_filtered_view(&records, &self.criteria);
        self.criteria_changed = false;

        // A shorter view may leave the scroll position past the end.
        self.scroll_offset = self
            .scroll_offset
            .min(self.viewport.max_scroll_offset(self.filtered.len()));
        self.sync_visible_range();
        true
    }

    /// Point the shared chart window at the rows the list currently shows.
    fn sync_visible_range(&mut self) {
        if let Some((start, stop)) = self.viewport.visible_indices(self.scroll_offset, self.filtered.len()) {
            self.on_visible_range_change(start, stop);
        }
    }

    pub fn filtered_view(&mut self) -> &[WeatherRecord] {
        self.refresh();
        &self.filtered
    }

    pub fn city_options(&mut self) -> &[CitySelection] {
        self.refresh();
        &self.cities
    }

    /// Records every chart plots: the visible window plus the buffer.
    pub fn chart_window(&mut self) -> &[WeatherRecord] {
        self.refresh();
        compute_chart_window(&self.filtered, self.visible_range, self.chart_buffer)
    }

    pub fn chart_series(&mut self) -> Vec<ChartSeries> {
        let window = self.chart_window();
        ChartKind::ALL
            .iter()
            .map(|kind| ChartSeries::from_window(*kind, window))
            .collect()
    }

    /// Render one list row; `None` when `index` is stale.
    pub fn row(&mut self, index: usize) -> Option<ListRow> {
        self.refresh();
        row_at(&self.filtered, index).map(|record| ListRow {
            index,
            cells: format_row(record),
        })
    }

    pub fn visible_rows(&mut self) -> Vec<ListRow> {
        self.refresh();
        match self.viewport.visible_indices(self.scroll_offset, self.filtered.len()) {
            Some((start, stop)) => (start..=stop).filter_map(|i| self.row(i)).collect(),
            None => Vec::new(),
        }
    }

    pub fn frame(&mut self) -> DashboardFrame {
        let charts = self.chart_series();
        let visible_rows = self.visible_rows();

        DashboardFrame {
            cities: self.cities.iter().map(|c| c.label().to_string()).collect(),
            selected_city: self.criteria.city.label().to_string(),
            start_date: self.criteria.date_range.start_str().to_string(),
            end_date: self.criteria.date_range.end_str().to_string(),
            charts,
            chart_width: self.chart_width,
            total_rows: self.filtered.len(),
            visible_rows,
            error: self.load_state().error_message().map(str::to_string),
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Ok(mut store) = self.store.try_borrow_mut() {
                store.unsubscribe(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WeatherStore;
    use pretty_assertions::assert_eq;

    fn record(date: &str, city: &str, temperature: f64) -> WeatherRecord {
        WeatherRecord::new(date.into(), city.into(), temperature, 0.0, 0.0, 50.0)
    }

    fn loaded_store(records: Vec<WeatherRecord>) -> SharedStore {
        let store = WeatherStore::shared();
        store.borrow_mut().replace(records);
        store
    }

    fn month_of_records() -> Vec<WeatherRecord> {
        (1..=30)
            .rev()
            .map(|day| {
                let city = if day % 2 == 0 { "NYC" } else { "LA" };
                record(&format!("2024-06-{:02}", day), city, day as f64)
            })
            .collect()
    }

    #[test]
    fn test_empty_store_renders_empty_frame() {
        let store = WeatherStore::shared();
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());
        let frame = dashboard.frame();

        assert_eq!(frame.cities, vec!["All".to_string()]);
        assert_eq!(frame.total_rows, 0);
        assert!(frame.visible_rows.is_empty());
        assert!(frame.charts.iter().all(ChartSeries::is_empty));
    }

    #[test]
    fn test_dataset_replace_triggers_recompute() {
        let store = WeatherStore::shared();
        let mut dashboard = Dashboard::new(Rc::clone(&store), &DashboardConfig::default());
        assert!(dashboard.filtered_view().is_empty());

        store.borrow_mut().replace(month_of_records());

        assert_eq!(dashboard.filtered_view().len(), 30);
        assert_eq!(dashboard.city_options().len(), 3);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let store = loaded_store(month_of_records());
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());

        assert!(dashboard.refresh());
        let first = dashboard.filtered_view().to_vec();
        assert!(!dashboard.refresh());
        dashboard.set_city(CitySelection::All);
        assert!(!dashboard.refresh());
        assert_eq!(dashboard.filtered_view(), first.as_slice());
    }

    #[test]
    fn test_city_and_range_filters() {
        let store = loaded_store(month_of_records());
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());

        dashboard.set_city(CitySelection::parse("NYC"));
        dashboard.set_date_range(DateRange::between("2024-06-10", "2024-06-20"));
        let view = dashboard.filtered_view();

        assert_eq!(view.len(), 6);
        assert_eq!(view[0].date, "2024-06-10");
        assert!(view.iter().all(|r| r.city == "NYC"));
    }

    #[test]
    fn test_all_charts_share_one_window() {
        let store = loaded_store(month_of_records());
        let config = DashboardConfig {
            chart_buffer: 2,
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::new(store, &config);
        dashboard.refresh();
        dashboard.on_visible_range_change(10, 15);

        let charts = dashboard.chart_series();
        assert_eq!(charts.len(), 5);
        for series in &charts {
            assert_eq!(series.len(), 10);
        }
        assert_eq!(dashboard.chart_window()[0].date, "2024-06-09");
    }

    #[test]
    fn test_scroll_feeds_chart_window() {
        let store = loaded_store(month_of_records());
        let config = DashboardConfig {
            chart_buffer: 0,
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::new(store, &config);

        dashboard.scroll_to(35 * 5);

        assert_eq!(dashboard.visible_range(), VisibleRange::new(5, 14));
        let window = dashboard.chart_window();
        assert_eq!(window.first().map(|r| r.date.as_str()), Some("2024-06-06"));
        assert_eq!(window.len(), 9);
    }

    #[test]
    fn test_stale_rows_after_filter_shrinks() {
        let store = loaded_store(month_of_records());
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());
        dashboard.scroll_to_row(25);
        assert!(dashboard.row(29).is_some());

        dashboard.set_date_range(DateRange::between("2024-06-01", "2024-06-03"));

        assert!(dashboard.row(29).is_none());
        let rows = dashboard.visible_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].index, 0);
    }

    fn assert_charts_cover_list_after_shrink(chart_buffer: usize) {
        let store = loaded_store(month_of_records());
        let config = DashboardConfig {
            chart_buffer,
            ..DashboardConfig::default()
        };
        let mut dashboard = Dashboard::new(store, &config);
        dashboard.scroll_to_row(25);

        dashboard.set_date_range(DateRange::between("2024-06-01", "2024-06-03"));

        let listed: Vec<String> = dashboard
            .visible_rows()
            .into_iter()
            .map(|row| row.cells[0].clone())
            .collect();
        let charted: Vec<String> = dashboard
            .chart_window()
            .iter()
            .map(|r| r.date.clone())
            .collect();

        assert_eq!(listed, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);
        assert_eq!(charted, listed);
        assert_eq!(dashboard.visible_range(), VisibleRange::new(0, 3));
    }

    #[test]
    fn test_chart_window_follows_list_after_shrink_without_buffer() {
        assert_charts_cover_list_after_shrink(0);
    }

    #[test]
    fn test_chart_window_follows_list_after_shrink_with_default_buffer() {
        assert_charts_cover_list_after_shrink(DashboardConfig::default().chart_buffer);
    }

    #[test]
    fn test_chart_width_is_shared_and_saturates() {
        let store = WeatherStore::shared();
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());

        dashboard.on_resize(820);
        assert_eq!(dashboard.chart_width(), 800);
        assert_eq!(dashboard.frame().chart_width, 800);

        dashboard.on_resize(5);
        assert_eq!(dashboard.chart_width(), 0);
    }

    #[test]
    fn test_frame_reports_load_failure() {
        let store = WeatherStore::shared();
        let mut dashboard = Dashboard::new(Rc::clone(&store), &DashboardConfig::default());
        store.borrow_mut().mark_failed("file not found");

        let frame = dashboard.frame();
        assert_eq!(frame.error.as_deref(), Some("file not found"));
        assert_eq!(frame.total_rows, 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = WeatherStore::shared();
        let dashboard = Dashboard::new(Rc::clone(&store), &DashboardConfig::default());
        assert_eq!(store.borrow().subscriber_count(), 1);

        drop(dashboard);
        assert_eq!(store.borrow().subscriber_count(), 0);
    }

    #[test]
    fn test_partial_date_entry() {
        let store = loaded_store(month_of_records());
        let mut dashboard = Dashboard::new(store, &DashboardConfig::default());

        dashboard.set_start_date(Some("2024-06-28".to_string()));
        assert_eq!(dashboard.filtered_view().len(), 30);

        dashboard.set_end_date(Some("2024-06-30".to_string()));
        assert_eq!(dashboard.filtered_view().len(), 3);
    }
}
