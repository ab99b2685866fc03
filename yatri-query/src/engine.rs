use crate::criteria::SearchCriteria;
use crate::state::SearchState;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;
use yatri_catalog::{BusRecord, HotelRecord, MealRecord, TrainRecord};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: i64, max: i64 },
}

/// Sort keys offered by the listing pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    DepartureTime,
    ArrivalTime,
    Duration,
    Price,
    Rating,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(&mut self) {
        *self = match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
    }
}

/// Comparable projection of a record for one sort key.
///
/// `Missing` sorts after everything else regardless of direction, so records
/// without the key (a hotel has no departure time) stay at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Zero-padded "HH:MM"; lexicographic order is chronological order.
    Time(String),
    Minutes(u32),
    Amount(i64),
    Score(f32),
    Missing,
}

impl SortValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 1,
            _ => 0,
        }
    }

    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Time(a), SortValue::Time(b)) => a.cmp(b),
            (SortValue::Minutes(a), SortValue::Minutes(b)) => a.cmp(b),
            (SortValue::Amount(a), SortValue::Amount(b)) => a.cmp(b),
            (SortValue::Score(a), SortValue::Score(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Durations of the form "15h 50m", "15h", or "45m" become total minutes.
/// Lexicographic comparison would put "10h 0m" before "2h 0m".
pub fn parse_duration_minutes(duration: &str) -> Option<u32> {
    let trimmed = duration.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut total: u32 = 0;
    for part in trimmed.split_whitespace() {
        if let Some(hours) = part.strip_suffix('h') {
            total = total.checked_add(hours.parse::<u32>().ok()?.checked_mul(60)?)?;
        } else if let Some(minutes) = part.strip_suffix('m') {
            total = total.checked_add(minutes.parse::<u32>().ok()?)?;
        } else {
            return None;
        }
    }
    Some(total)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn within_price(price: i64, criteria: &SearchCriteria) -> bool {
    let (min, max) = criteria.price_range();
    price >= min && price <= max
}

fn has_all_amenities(amenities: &[String], wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|w| amenities.iter().any(|a| a.eq_ignore_ascii_case(w)))
}

/// A record the query engine can filter and sort.
pub trait Queryable {
    fn matches(&self, criteria: &SearchCriteria) -> bool;
    fn sort_value(&self, key: SortKey) -> SortValue;
}

impl Queryable for TrainRecord {
    fn matches(&self, criteria: &SearchCriteria) -> bool {
        (criteria.origin.is_empty() || contains_ci(&self.source, &criteria.origin))
            && (criteria.destination.is_empty()
                || contains_ci(&self.destination, &criteria.destination))
            && criteria.date.map_or(true, |date| self.date == date)
            && criteria
                .travel_class
                .map_or(true, |class| self.offers_class(class))
            && criteria
                .availability
                .map_or(true, |bucket| bucket.matches(&self.availability))
            && within_price(self.price, criteria)
            && (criteria.query.is_empty()
                || contains_ci(&self.train_name, &criteria.query)
                || contains_ci(&self.train_number, &criteria.query))
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::DepartureTime => SortValue::Time(self.departure_time.clone()),
            SortKey::ArrivalTime => SortValue::Time(self.arrival_time.clone()),
            SortKey::Duration => parse_duration_minutes(&self.duration)
                .map(SortValue::Minutes)
                .unwrap_or(SortValue::Missing),
            SortKey::Price => SortValue::Amount(self.price),
            SortKey::Rating => SortValue::Missing,
        }
    }
}

impl Queryable for BusRecord {
    fn matches(&self, criteria: &SearchCriteria) -> bool {
        (criteria.origin.is_empty() || contains_ci(&self.source, &criteria.origin))
            && (criteria.destination.is_empty()
                || contains_ci(&self.destination, &criteria.destination))
            && within_price(self.price, criteria)
            && has_all_amenities(&self.amenities, &criteria.amenities)
            && (criteria.query.is_empty()
                || contains_ci(&self.operator, &criteria.query)
                || contains_ci(&self.bus_type, &criteria.query))
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::DepartureTime => SortValue::Time(self.departure_time.clone()),
            SortKey::ArrivalTime => SortValue::Time(self.arrival_time.clone()),
            SortKey::Duration => parse_duration_minutes(&self.duration)
                .map(SortValue::Minutes)
                .unwrap_or(SortValue::Missing),
            SortKey::Price => SortValue::Amount(self.price),
            SortKey::Rating => SortValue::Score(self.rating),
        }
    }
}

impl Queryable for HotelRecord {
    fn matches(&self, criteria: &SearchCriteria) -> bool {
        (criteria.destination.is_empty() || contains_ci(&self.city, &criteria.destination))
            && within_price(self.price_per_night, criteria)
            && has_all_amenities(&self.amenities, &criteria.amenities)
            && (criteria.query.is_empty()
                || contains_ci(&self.name, &criteria.query)
                || contains_ci(&self.city, &criteria.query))
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Price => SortValue::Amount(self.price_per_night),
            SortKey::Rating => SortValue::Score(self.rating),
            _ => SortValue::Missing,
        }
    }
}

impl Queryable for MealRecord {
    fn matches(&self, criteria: &SearchCriteria) -> bool {
        criteria
            .meal_category
            .map_or(true, |category| self.category == category)
            && (criteria.station.is_empty()
                || self
                    .stations
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(&criteria.station)))
            && within_price(self.price, criteria)
            && (criteria.query.is_empty()
                || contains_ci(&self.name, &criteria.query)
                || contains_ci(&self.description, &criteria.query))
    }

    fn sort_value(&self, key: SortKey) -> SortValue {
        match key {
            SortKey::Price => SortValue::Amount(self.price),
            SortKey::Rating => SortValue::Score(self.rating),
            _ => SortValue::Missing,
        }
    }
}

/// Stable sort by the projected key. The direction applies only to records
/// that carry the key; `Missing` values are pinned after everything else in
/// both directions.
pub fn sort_records<T: Queryable>(records: &mut [T], key: SortKey, direction: SortDirection) {
    records.sort_by(|a, b| {
        let left = a.sort_value(key);
        let right = b.sort_value(key);
        match (left.is_missing(), right.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match direction {
                SortDirection::Ascending => left.compare(&right),
                SortDirection::Descending => left.compare(&right).reverse(),
            },
        }
    });
}

/// Filter a collection against criteria, distinguishing a zero-match search
/// from a search that never ran.
pub fn run_query<T: Queryable + Clone>(
    records: &[T],
    criteria: &SearchCriteria,
) -> Result<SearchState<T>, QueryError> {
    if let (Some(min), Some(max)) = (criteria.min_price, criteria.max_price) {
        if min > max {
            return Err(QueryError::InvalidPriceRange { min, max });
        }
    }

    let matched: Vec<T> = records
        .iter()
        .filter(|r| r.matches(criteria))
        .cloned()
        .collect();

    debug!(total = records.len(), matched = matched.len(), "query run");

    if matched.is_empty() {
        Ok(SearchState::Empty)
    } else {
        Ok(SearchState::Results(matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yatri_core::Availability;

    fn bus(id: u32, source: &str, destination: &str, price: i64, duration: &str) -> BusRecord {
        BusRecord {
            id,
            operator: "VRL Travels".to_string(),
            bus_type: "AC Sleeper".to_string(),
            source: source.to_string(),
            destination: destination.to_string(),
            departure_time: "21:30".to_string(),
            arrival_time: "06:15".to_string(),
            duration: duration.to_string(),
            price,
            rating: 4.2,
            amenities: vec!["wifi".to_string(), "charging".to_string()],
        }
    }

    fn train(id: u32, source: &str, destination: &str, price: i64) -> TrainRecord {
        TrainRecord {
            id,
            train_number: format!("12{id:03}"),
            train_name: format!("Rajdhani Express {source} - {destination}"),
            source: source.to_string(),
            destination: destination.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            departure_time: "16:25".to_string(),
            arrival_time: "08:15".to_string(),
            duration: "15h 50m".to_string(),
            price,
            availability: Availability::Available,
            classes: vec![],
        }
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(parse_duration_minutes("15h 50m"), Some(950));
        assert_eq!(parse_duration_minutes("1h 5m"), Some(65));
        assert_eq!(parse_duration_minutes("45m"), Some(45));
        assert_eq!(parse_duration_minutes("2h"), Some(120));
        assert_eq!(parse_duration_minutes(""), None);
        assert_eq!(parse_duration_minutes("soon"), None);
    }

    #[test]
    fn test_duration_sort_is_numeric_not_lexicographic() {
        let mut buses = vec![
            bus(1, "Delhi", "Jaipur", 500, "10h 0m"),
            bus(2, "Delhi", "Jaipur", 500, "1h 5m"),
            bus(3, "Delhi", "Jaipur", 500, "2h 0m"),
        ];
        sort_records(&mut buses, SortKey::Duration, SortDirection::Ascending);
        let durations: Vec<&str> = buses.iter().map(|b| b.duration.as_str()).collect();
        assert_eq!(durations, vec!["1h 5m", "2h 0m", "10h 0m"]);
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let records = vec![
            train(1, "Delhi", "Mumbai", 1500),
            train(2, "Delhi", "Chennai", 900),
            train(3, "Kolkata", "Mumbai", 1500),
            train(4, "Delhi", "Mumbai", 5000),
        ];
        let criteria = SearchCriteria {
            origin: "del".to_string(),
            destination: "mum".to_string(),
            min_price: Some(1000),
            max_price: Some(2000),
            ..SearchCriteria::default()
        };
        let state = run_query(&records, &criteria).unwrap();
        let results = state.results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
        // Nothing outside the result set satisfies all three predicates.
        for record in &records {
            if record.id != 1 {
                assert!(!record.matches(&criteria));
            }
        }
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let records = vec![train(1, "Delhi", "Mumbai", 1500)];
        let criteria = SearchCriteria {
            origin: "DEL".to_string(),
            ..SearchCriteria::default()
        };
        assert!(records[0].matches(&criteria));
    }

    #[test]
    fn test_amenity_filter_requires_superset() {
        let record = bus(1, "Delhi", "Jaipur", 500, "5h 0m");
        let mut criteria = SearchCriteria {
            amenities: vec!["wifi".to_string()],
            ..SearchCriteria::default()
        };
        assert!(record.matches(&criteria));
        criteria.amenities.push("tv".to_string());
        assert!(!record.matches(&criteria));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let record = train(1, "Delhi", "Mumbai", 1500);
        let criteria = SearchCriteria {
            min_price: Some(1500),
            max_price: Some(1500),
            ..SearchCriteria::default()
        };
        assert!(record.matches(&criteria));
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        let records = vec![train(1, "Delhi", "Mumbai", 1500)];
        let criteria = SearchCriteria {
            min_price: Some(2000),
            max_price: Some(1000),
            ..SearchCriteria::default()
        };
        assert!(matches!(
            run_query(&records, &criteria),
            Err(QueryError::InvalidPriceRange { .. })
        ));
    }

    #[test]
    fn test_zero_matches_is_empty_state() {
        let records = vec![train(1, "Delhi", "Mumbai", 1500)];
        let criteria = SearchCriteria {
            origin: "Pune".to_string(),
            ..SearchCriteria::default()
        };
        assert!(matches!(
            run_query(&records, &criteria),
            Ok(SearchState::Empty)
        ));
    }

    #[test]
    fn test_missing_sort_value_stays_last_in_both_directions() {
        let mut buses = vec![
            bus(1, "Delhi", "Jaipur", 500, "n/a"),
            bus(2, "Delhi", "Jaipur", 500, "2h 0m"),
            bus(3, "Delhi", "Jaipur", 500, "10h 0m"),
        ];
        sort_records(&mut buses, SortKey::Duration, SortDirection::Ascending);
        let ids: Vec<u32> = buses.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        sort_records(&mut buses, SortKey::Duration, SortDirection::Descending);
        let ids: Vec<u32> = buses.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_descending_toggle() {
        let mut direction = SortDirection::Ascending;
        direction.toggle();
        assert_eq!(direction, SortDirection::Descending);

        let mut buses = vec![
            bus(1, "Delhi", "Jaipur", 300, "5h 0m"),
            bus(2, "Delhi", "Jaipur", 900, "5h 0m"),
        ];
        sort_records(&mut buses, SortKey::Price, SortDirection::Descending);
        assert_eq!(buses[0].price, 900);
    }
}
