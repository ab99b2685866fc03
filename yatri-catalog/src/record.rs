use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use yatri_core::{Availability, FareClass};

/// Fare for one class on a train, with its own availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassFare {
    pub class: FareClass,
    pub price: i64,
    pub availability: Availability,
}

/// A scheduled train between two cities.
///
/// Records are immutable once generated; listing pages only derive filtered
/// views from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRecord {
    pub id: u32,
    pub train_number: String,
    pub train_name: String,
    pub source: String,
    pub destination: String,
    pub date: NaiveDate,
    /// Zero-padded 24-hour "HH:MM".
    pub departure_time: String,
    pub arrival_time: String,
    /// "<h>h <m>m"
    pub duration: String,
    pub price: i64,
    pub availability: Availability,
    pub classes: Vec<ClassFare>,
}

impl TrainRecord {
    pub fn offers_class(&self, class: FareClass) -> bool {
        self.classes.iter().any(|c| c.class == class)
    }

    pub fn class_fare(&self, class: FareClass) -> Option<&ClassFare> {
        self.classes.iter().find(|c| c.class == class)
    }
}

/// An intercity bus service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusRecord {
    pub id: u32,
    pub operator: String,
    pub bus_type: String,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: i64,
    pub rating: f32,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub price_per_night: i64,
    pub rating: f32,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MealCategory {
    Veg,
    NonVeg,
    Snacks,
    Beverages,
    Combo,
}

impl MealCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Veg => "veg",
            MealCategory::NonVeg => "non-veg",
            MealCategory::Snacks => "snacks",
            MealCategory::Beverages => "beverages",
            MealCategory::Combo => "combo",
        }
    }
}

/// An onboard meal deliverable at the stations it is served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: MealCategory,
    pub price: i64,
    pub rating: f32,
    pub stations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_class() {
        let train = TrainRecord {
            id: 1,
            train_number: "12001".to_string(),
            train_name: "Shatabdi Express Delhi - Bhopal".to_string(),
            source: "Delhi".to_string(),
            destination: "Bhopal".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            departure_time: "06:00".to_string(),
            arrival_time: "14:30".to_string(),
            duration: "8h 30m".to_string(),
            price: 1200,
            availability: Availability::Available,
            classes: vec![ClassFare {
                class: FareClass::AcThreeTier,
                price: 1200,
                availability: Availability::Waitlist(5),
            }],
        };
        assert!(train.offers_class(FareClass::AcThreeTier));
        assert!(!train.offers_class(FareClass::AcFirst));
        assert_eq!(
            train.class_fare(FareClass::AcThreeTier).unwrap().price,
            1200
        );
    }
}
