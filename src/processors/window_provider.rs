use crate::models::{VisibleRange, WeatherRecord};

/// Slice of `view` that every chart renders.
///
/// Returns `view[max(0, start - buffer) .. min(len, end + buffer)]`. The
/// bounds are clamped, so negative starts, oversized ends and ranges left
/// over from a longer view all yield a valid (possibly empty) slice.
pub fn compute_chart_window(view: &[WeatherRecord], range: VisibleRange, buffer: usize) -> &[WeatherRecord] {
    let (start, end) = range.buffered_bounds(buffer, view.len());
    &view[start..end]
}

/// Bounds-checked row lookup for the virtualized list.
pub fn row_at(view: &[WeatherRecord], index: usize) -> Option<&WeatherRecord> {
    view.get(index)
}

/// Display cells for one list row: date, city and the four metrics with units.
pub fn format_row(record: &WeatherRecord) -> [String; 6] {
    [
        record.date.clone(),
        record.city.clone(),
        format!("{:.1}°C", record.temperature),
        format!("{:.1}mm", record.precipitation),
        format!("{:.1} km/h", record.wind_speed),
        format!("{:.1}%", record.humidity),
    ]
}

/// Fixed-row-height list virtualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
    height: u32,
    item_size: u32,
}

impl ListViewport {
    pub fn new(height: u32, item_size: u32) -> Self {
        Self {
            height,
            item_size: item_size.max(1),
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn item_size(&self) -> u32 {
        self.item_size
    }

    /// First and last row (inclusive) intersecting the viewport at
    /// `scroll_offset`, or `None` when the list is empty.
    pub fn visible_indices(&self, scroll_offset: u64, item_count: usize) -> Option<(usize, usize)> {
        if item_count == 0 {
            return None;
        }

        let item_size = u64::from(self.item_size.max(1));
        let last = item_count - 1;
        let offset = scroll_offset.min(self.max_scroll_offset(item_count));

        let start = usize::try_from(offset / item_size).unwrap_or(usize::MAX).min(last);
        let bottom = offset.saturating_add(u64::from(self.height.max(1)));
        let rows_to_bottom = bottom.saturating_add(item_size - 1) / item_size;
        let stop = usize::try_from(rows_to_bottom.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .min(last);

        Some((start, stop.max(start)))
    }

    /// Largest meaningful scroll offset for `item_count` rows.
    pub fn max_scroll_offset(&self, item_count: usize) -> u64 {
        let total = (item_count as u64).saturating_mul(u64::from(self.item_size.max(1)));
        total.saturating_sub(u64::from(self.height))
    }

    /// Scroll offset that puts `index` at the top of the viewport.
    pub fn offset_for_index(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(u64::from(self.item_size.max(1)))
    }
}
