use crate::dashboard::DashboardFrame;
use crate::processors::{ChartPoint, ChartSeries, ChartStyle};
use crate::utils::constants::CSV_HEADERS;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Plain-text rendering of a dashboard frame.
pub fn render_frame(frame: &DashboardFrame) -> String {
    let mut out = String::new();

    out.push_str("=== Weather Data ===\n");
    if let Some(error) = &frame.error {
        out.push_str(&format!("Load failed: {}\n", error));
    }
    out.push_str(&format!("City: {}  (choices: {})\n", frame.selected_city, frame.cities.join(", ")));
    out.push_str(&format!(
        "Start Date: {}  End Date: {}\n",
        display_or_dash(&frame.start_date),
        display_or_dash(&frame.end_date)
    ));

    let columns = usize::try_from(frame.chart_width).unwrap_or(usize::MAX);
    for series in &frame.charts {
        out.push('\n');
        out.push_str(&render_chart(series, columns));
    }

    out.push_str(&format!("\nData ({} rows)\n", frame.total_rows));
    out.push_str(&format_table_row(&CSV_HEADERS.map(str::to_string)));
    for row in &frame.visible_rows {
        out.push_str(&format_table_row(&row.cells));
    }

    out
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn format_table_row(cells: &[String; 6]) -> String {
    format!(
        "{:<12}{:<14}{:>13}{:>15}{:>12}{:>10}\n",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
    )
}

pub fn render_chart(series: &ChartSeries, columns: usize) -> String {
    let kind = series.kind;
    let mut out = format!("{} ({} points)\n", kind.title(), series.len());

    let Some((low, high)) = series.y_bounds() else {
        out.push_str("  (no data)\n");
        return out;
    };

    match kind.style() {
        ChartStyle::Scatter => {
            let (x_low, x_high) = x_bounds(&series.points).unwrap_or((0.0, 0.0));
            out.push_str(&format!(
                "  temperature {:.1}..{:.1}°C, humidity {:.1}..{:.1}{}\n",
                x_low,
                x_high,
                low,
                high,
                kind.unit()
            ));
        }
        _ => {
            let values: Vec<f64> = series.points.iter().map(ChartPoint::y).collect();
            out.push_str(&format!("  {}\n", sparkline(&values, columns, low, high)));
            out.push_str(&format!("  min {:.1}{unit}  max {:.1}{unit}\n", low, high, unit = kind.unit()));
        }
    }

    out
}

fn x_bounds(points: &[ChartPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .filter_map(|p| match p {
            ChartPoint::Xy { x, .. } if x.is_finite() => Some(*x),
            _ => None,
        })
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// One block character per value, downsampled to at most `columns`.
pub fn sparkline(values: &[f64], columns: usize, low: f64, high: f64) -> String {
    if values.is_empty() || columns == 0 {
        return String::new();
    }

    let step = values.len().div_euclid(columns).max(1);
    let span = high - low;

    values
        .iter()
        .step_by(step)
        .take(columns)
        .map(|value| {
            if !value.is_finite() || span <= 0.0 {
                return SPARK_LEVELS[0];
            }
            let scaled = ((value - low) / span * (SPARK_LEVELS.len() - 1) as f64).round();
            SPARK_LEVELS[(scaled.max(0.0) as usize).min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ListRow;
    use crate::processors::ChartKind;
    use crate::models::WeatherRecord;

    #[test]
    fn test_sparkline_scales_between_bounds() {
        assert_eq!(sparkline(&[0.0, 7.0, 3.5], 10, 0.0, 7.0), "▁█▅");
        assert_eq!(sparkline(&[1.0, 1.0], 10, 1.0, 1.0), "▁▁");
        assert_eq!(sparkline(&[], 10, 0.0, 1.0), "");
    }

    #[test]
    fn test_sparkline_downsamples() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(sparkline(&values, 10, 0.0, 99.0).chars().count(), 10);
    }

    #[test]
    fn test_render_frame_contains_rows_and_charts() {
        let record = WeatherRecord::new("2024-01-01".into(), "NYC".into(), 5.0, 1.0, 10.0, 80.0);
        let window = vec![record.clone()];
        let frame = DashboardFrame {
            cities: vec!["All".to_string(), "NYC".to_string()],
            selected_city: "All".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            charts: ChartKind::ALL
                .iter()
                .map(|kind| ChartSeries::from_window(*kind, &window))
                .collect(),
            chart_width: 40,
            total_rows: 1,
            visible_rows: vec![ListRow {
                index: 0,
                cells: crate::processors::format_row(&record),
            }],
            error: None,
        };

        let text = render_frame(&frame);
        assert!(text.contains("City: All  (choices: All, NYC)"));
        assert!(text.contains("Temperature vs Humidity (1 points)"));
        assert!(text.contains("5.0°C"));
        assert!(text.contains("Data (1 rows)"));
    }
}
