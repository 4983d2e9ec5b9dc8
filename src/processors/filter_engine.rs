use std::collections::HashSet;
use tracing::debug;

use crate::models::{CitySelection, FilterCriteria, WeatherRecord};

/// Records matching `criteria`, ordered by date.
///
/// The city filter is an exact, case-sensitive match unless the selection is
/// `All`. The date filter compares the stored date text lexically and only
/// applies when both bounds are set. Ordering is a stable sort on the parsed
/// calendar date, so records sharing a date keep their input order. Records
/// whose date does not parse sort ahead of all dated records.
pub fn compute_filtered_view(dataset: &[WeatherRecord], criteria: &FilterCriteria) -> Vec<WeatherRecord> {
    let mut keyed: Vec<_> = dataset
        .iter()
        .filter(|record| criteria.matches(record))
        .map(|record| (record.parsed_date(), record))
        .collect();

    // `sort_by_key` is stable; `None` orders before any `Some`.
    keyed.sort_by_key(|(date, _)| *date);

    let view: Vec<WeatherRecord> = keyed.into_iter().map(|(_, record)| record.clone()).collect();

    debug!(
        city = %criteria.city,
        start = criteria.date_range.start_str(),
        end = criteria.date_range.end_str(),
        matched = view.len(),
        total = dataset.len(),
        "Filtered view recomputed"
    );

    view
}

/// Selector choices: `All` first, then each distinct city in order of first
/// appearance in the full dataset.
pub fn city_options(dataset: &[WeatherRecord]) -> Vec<CitySelection> {
    let mut seen = HashSet::new();
    let mut options = vec![CitySelection::All];

    for record in dataset {
        if seen.insert(record.city.as_str()) {
            options.push(CitySelection::City(record.city.clone()));
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use pretty_assertions::assert_eq;

    fn record(date: &str, city: &str, temperature: f64) -> WeatherRecord {
        WeatherRecord::new(date.into(), city.into(), temperature, 0.0, 0.0, 0.0)
    }

    fn two_city_dataset() -> Vec<WeatherRecord> {
        vec![
            record("2024-01-01", "NYC", 5.0),
            record("2024-01-02", "LA", 20.0),
        ]
    }

    fn mixed_dataset() -> Vec<WeatherRecord> {
        vec![
            record("2024-03-01", "NYC", 1.0),
            record("2024-01-15", "LA", 2.0),
            record("2024-02-10", "NYC", 3.0),
            record("2024-01-15", "NYC", 4.0),
            record("2024-02-10", "LA", 5.0),
            record("2024-01-01", "Chicago", 6.0),
            record("2024-01-15", "Chicago", 7.0),
        ]
    }

    #[test]
    fn test_city_filter_keeps_only_selected_city() {
        let view = compute_filtered_view(&two_city_dataset(), &FilterCriteria::for_city("NYC"));
        assert_eq!(view, vec![record("2024-01-01", "NYC", 5.0)]);
    }

    #[test]
    fn test_single_day_range() {
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::between("2024-01-02", "2024-01-02"));
        let view = compute_filtered_view(&two_city_dataset(), &criteria);

        assert_eq!(view, vec![record("2024-01-02", "LA", 20.0)]);
    }

    #[test]
    fn test_all_without_range_returns_everything_sorted() {
        let view = compute_filtered_view(&mixed_dataset(), &FilterCriteria::default());

        assert_eq!(view.len(), 7);
        assert!(view.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let view = compute_filtered_view(&mixed_dataset(), &FilterCriteria::default());
        let jan_15: Vec<f64> = view
            .iter()
            .filter(|r| r.date == "2024-01-15")
            .map(|r| r.temperature)
            .collect();

        assert_eq!(jan_15, vec![2.0, 4.0, 7.0]);
    }

    #[test]
    fn test_every_record_satisfies_predicates() {
        let criteria = FilterCriteria::for_city("NYC")
            .with_date_range(DateRange::between("2024-01-10", "2024-02-28"));
        let view = compute_filtered_view(&mixed_dataset(), &criteria);

        assert_eq!(view.len(), 2);
        for record in &view {
            assert_eq!(record.city, "NYC");
            assert!(record.date.as_str() >= "2024-01-10" && record.date.as_str() <= "2024-02-28");
        }
    }

    #[test]
    fn test_refiltering_is_idempotent() {
        let criteria = FilterCriteria::for_city("LA")
            .with_date_range(DateRange::between("2024-01-01", "2024-12-31"));
        let once = compute_filtered_view(&mixed_dataset(), &criteria);
        let twice = compute_filtered_view(&once, &criteria);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_city_yields_empty_view() {
        let view = compute_filtered_view(&mixed_dataset(), &FilterCriteria::for_city("Boston"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_half_filled_range_does_not_filter() {
        let criteria = FilterCriteria::default()
            .with_date_range(DateRange::new(Some("2030-01-01".to_string()), None));
        let view = compute_filtered_view(&mixed_dataset(), &criteria);

        assert_eq!(view.len(), 7);
    }

    #[test]
    fn test_undated_records_sort_first_in_input_order() {
        let dataset = vec![
            record("2024-01-02", "NYC", 1.0),
            record("unknown", "NYC", 2.0),
            record("", "NYC", 3.0),
            record("2024-01-01", "NYC", 4.0),
        ];
        let view = compute_filtered_view(&dataset, &FilterCriteria::default());
        let temps: Vec<f64> = view.iter().map(|r| r.temperature).collect();

        assert_eq!(temps, vec![2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn test_city_options_distinct_with_all_first() {
        let options = city_options(&mixed_dataset());

        assert_eq!(
            options,
            vec![
                CitySelection::All,
                CitySelection::City("NYC".to_string()),
                CitySelection::City("LA".to_string()),
                CitySelection::City("Chicago".to_string()),
            ]
        );
    }

    #[test]
    fn test_city_options_for_empty_dataset() {
        assert_eq!(city_options(&[]), vec![CitySelection::All]);
    }

    #[test]
    fn test_city_named_all_is_not_duplicated_sentinel() {
        let dataset = vec![record("2024-01-01", "All", 0.0)];
        let options = city_options(&dataset);

        assert_eq!(options.iter().filter(|o| o.is_all()).count(), 1);
        assert_eq!(options.len(), 2);
    }
}
