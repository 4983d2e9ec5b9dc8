use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WeatherRecord;
use crate::utils::constants::ALL_CITIES;

/// City selector value. `All` disables city filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CitySelection {
    #[default]
    All,
    City(String),
}

impl CitySelection {
    /// Map a selector label to a selection; the `All` label is the sentinel.
    pub fn parse(label: &str) -> Self {
        if label == ALL_CITIES {
            CitySelection::All
        } else {
            CitySelection::City(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CitySelection::All => ALL_CITIES,
            CitySelection::City(city) => city,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CitySelection::All)
    }

    pub fn accepts(&self, record: &WeatherRecord) -> bool {
        match self {
            CitySelection::All => true,
            CitySelection::City(city) => record.matches_city(city),
        }
    }
}

impl fmt::Display for CitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Option<String>> for CitySelection {
    fn from(value: Option<String>) -> Self {
        value.map_or(CitySelection::All, |label| CitySelection::parse(&label))
    }
}

/// Inclusive date bounds as entered by the user.
///
/// The range only filters when both ends are present and non-empty; a
/// half-filled range behaves like no range at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Both bounds, when the range is active.
    pub fn bounds(&self) -> Option<(&str, &str)> {
        match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                Some((start, end))
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn start_str(&self) -> &str {
        self.start.as_deref().unwrap_or("")
    }

    pub fn end_str(&self) -> &str {
        self.end.as_deref().unwrap_or("")
    }

    pub fn accepts(&self, record: &WeatherRecord) -> bool {
        match self.bounds() {
            Some((start, end)) => record.within_dates(start, end),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub city: CitySelection,
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new(city: CitySelection, date_range: DateRange) -> Self {
        Self { city, date_range }
    }

    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: CitySelection::City(city.into()),
            date_range: DateRange::default(),
        }
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn matches(&self, record: &WeatherRecord) -> bool {
        self.city.accepts(record) && self.date_range.accepts(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, city: &str) -> WeatherRecord {
        WeatherRecord::new(date.into(), city.into(), 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_all_label_is_sentinel() {
        assert_eq!(CitySelection::parse("All"), CitySelection::All);
        assert_eq!(
            CitySelection::parse("all"),
            CitySelection::City("all".to_string())
        );
        assert_eq!(CitySelection::All.label(), "All");
    }

    #[test]
    fn test_city_match_is_case_sensitive() {
        let selection = CitySelection::City("NYC".to_string());
        assert!(selection.accepts(&record("2024-01-01", "NYC")));
        assert!(!selection.accepts(&record("2024-01-01", "nyc")));
    }

    #[test]
    fn test_half_open_range_is_inactive() {
        let range = DateRange::new(Some("2024-01-01".to_string()), None);
        assert!(!range.is_active());
        assert!(range.accepts(&record("1999-01-01", "NYC")));

        let range = DateRange::new(Some("2024-01-01".to_string()), Some(String::new()));
        assert!(!range.is_active());
    }

    #[test]
    fn test_criteria_combines_predicates() {
        let criteria = FilterCriteria::for_city("LA")
            .with_date_range(DateRange::between("2024-01-02", "2024-01-02"));

        assert!(criteria.matches(&record("2024-01-02", "LA")));
        assert!(!criteria.matches(&record("2024-01-01", "LA")));
        assert!(!criteria.matches(&record("2024-01-02", "NYC")));
    }
}
