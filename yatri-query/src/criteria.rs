use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use yatri_catalog::MealCategory;
use yatri_core::{AvailabilityBucket, FareClass};

pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 10;

/// Everything a listing page can filter on. Empty or `None` fields match
/// all records; filtering across set fields is conjunctive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring match against the record's origin.
    pub origin: String,
    /// Case-insensitive substring match against the record's destination.
    pub destination: String,
    pub date: Option<NaiveDate>,
    pub travelers: u32,
    pub travel_class: Option<FareClass>,
    pub availability: Option<AvailabilityBucket>,
    /// Free-text query against names and descriptions.
    pub query: String,
    /// Inclusive bounds.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Records must carry every selected amenity.
    pub amenities: Vec<String>,
    pub meal_category: Option<MealCategory>,
    pub station: String,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            date: None,
            travelers: MIN_TRAVELERS,
            travel_class: None,
            availability: None,
            query: String::new(),
            min_price: None,
            max_price: None,
            amenities: Vec::new(),
            meal_category: None,
            station: String::new(),
        }
    }
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
            && self.destination.is_empty()
            && self.date.is_none()
            && self.travel_class.is_none()
            && self.availability.is_none()
            && self.query.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.amenities.is_empty()
            && self.meal_category.is_none()
            && self.station.is_empty()
    }

    /// Traveler counters on the search bar clamp instead of erroring.
    pub fn set_travelers(&mut self, count: u32) {
        self.travelers = count.clamp(MIN_TRAVELERS, MAX_TRAVELERS);
    }

    pub fn price_range(&self) -> (i64, i64) {
        (
            self.min_price.unwrap_or(0),
            self.max_price.unwrap_or(i64::MAX),
        )
    }
}
