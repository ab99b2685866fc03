use crate::record::{
    BusRecord, ClassFare, HotelRecord, MealCategory, MealRecord, TrainRecord,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use yatri_core::{Availability, FareClass, FareTable};

/// Rejection-sampling cap for origin/destination draws. After this many
/// redraws the destination is forced to the next city in the pool, which is
/// always distinct because the pool holds at least two cities.
const ROUTE_RETRY_CAP: u32 = 32;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("City pool too small: need at least 2 cities, got {0}")]
    PoolTooSmall(usize),

    #[error("Empty name pool: {0}")]
    EmptyPool(&'static str),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

// Default travel window, evaluated at compile time.
const DEFAULT_DATE_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 3, 23) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};
const DEFAULT_DATE_END: NaiveDate = match NaiveDate::from_ymd_opt(2025, 4, 30) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// Reference names and ranges the generator draws from.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub train_count: usize,
    pub bus_count: usize,
    pub hotel_count: usize,
    pub cities: Vec<String>,
    pub train_names: Vec<String>,
    pub bus_operators: Vec<String>,
    pub hotel_names: Vec<String>,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            train_count: 150,
            bus_count: 60,
            hotel_count: 40,
            cities: DEFAULT_CITIES.iter().map(|c| c.to_string()).collect(),
            train_names: DEFAULT_TRAIN_NAMES.iter().map(|n| n.to_string()).collect(),
            bus_operators: DEFAULT_BUS_OPERATORS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            hotel_names: DEFAULT_HOTEL_NAMES.iter().map(|n| n.to_string()).collect(),
            date_start: DEFAULT_DATE_START,
            date_end: DEFAULT_DATE_END,
        }
    }
}

/// Produces the searchable universe of trains, buses, hotels, and meals.
///
/// The random source is injected so tests can seed it; the generator itself
/// never reaches for ambient randomness.
pub struct CatalogGenerator {
    config: GeneratorConfig,
    fares: FareTable,
}

impl CatalogGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, CatalogError> {
        if config.cities.len() < 2 {
            return Err(CatalogError::PoolTooSmall(config.cities.len()));
        }
        if config.train_names.is_empty() {
            return Err(CatalogError::EmptyPool("train_names"));
        }
        if config.bus_operators.is_empty() {
            return Err(CatalogError::EmptyPool("bus_operators"));
        }
        if config.hotel_names.is_empty() {
            return Err(CatalogError::EmptyPool("hotel_names"));
        }
        if config.date_start > config.date_end {
            return Err(CatalogError::InvalidDateRange {
                start: config.date_start,
                end: config.date_end,
            });
        }
        Ok(Self {
            config,
            fares: FareTable::default(),
        })
    }

    pub fn with_fares(mut self, fares: FareTable) -> Self {
        self.fares = fares;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate_trains(&self, rng: &mut impl Rng) -> Vec<TrainRecord> {
        (1..=self.config.train_count as u32)
            .map(|id| self.train(id, rng))
            .collect()
    }

    pub fn generate_buses(&self, rng: &mut impl Rng) -> Vec<BusRecord> {
        (1..=self.config.bus_count as u32)
            .map(|id| self.bus(id, rng))
            .collect()
    }

    pub fn generate_hotels(&self, rng: &mut impl Rng) -> Vec<HotelRecord> {
        (1..=self.config.hotel_count as u32)
            .map(|id| self.hotel(id, rng))
            .collect()
    }

    /// The meal menu is a fixed list; only ratings and serving stations vary.
    pub fn generate_meals(&self, rng: &mut impl Rng) -> Vec<MealRecord> {
        MEAL_MENU
            .iter()
            .enumerate()
            .map(|(index, (name, description, category, price))| MealRecord {
                id: index as u32 + 1,
                name: name.to_string(),
                description: description.to_string(),
                category: *category,
                price: *price,
                rating: self.rating(rng),
                stations: self.station_subset(rng),
            })
            .collect()
    }

    fn train(&self, id: u32, rng: &mut impl Rng) -> TrainRecord {
        let (source, destination) = self.pick_route(rng);
        let departure = rng.gen_range(0..288) * 5;
        let travel_minutes = rng.gen_range(4 * 60..36 * 60);
        let classes = self.class_fares(rng);
        let headline = classes
            .iter()
            .map(|c| c.price)
            .min()
            .unwrap_or_else(|| self.fares.rate_for(FareClass::Sleeper));

        TrainRecord {
            id,
            train_number: format!("12{id:03}"),
            train_name: format!(
                "{} {} - {}",
                self.pick(&self.config.train_names, rng),
                source,
                destination
            ),
            source,
            destination,
            date: self.random_date(rng),
            departure_time: format_time(departure),
            arrival_time: format_time((departure + travel_minutes) % 1440),
            duration: format_duration(travel_minutes),
            price: headline,
            availability: classes[0].availability.clone(),
            classes,
        }
    }

    fn bus(&self, id: u32, rng: &mut impl Rng) -> BusRecord {
        let (source, destination) = self.pick_route(rng);
        let departure = rng.gen_range(0..288) * 5;
        let travel_minutes = rng.gen_range(3 * 60..16 * 60);

        BusRecord {
            id,
            operator: self.pick(&self.config.bus_operators, rng),
            bus_type: self.pick_static(BUS_TYPES, rng),
            source,
            destination,
            departure_time: format_time(departure),
            arrival_time: format_time((departure + travel_minutes) % 1440),
            duration: format_duration(travel_minutes),
            price: rng.gen_range(3..26) * 100,
            rating: self.rating(rng),
            amenities: self.amenity_subset(BUS_AMENITIES, rng),
        }
    }

    fn hotel(&self, id: u32, rng: &mut impl Rng) -> HotelRecord {
        let city = self.pick(&self.config.cities, rng);
        HotelRecord {
            id,
            name: format!("{} {}", self.pick(&self.config.hotel_names, rng), city),
            city,
            price_per_night: rng.gen_range(10..81) * 100,
            rating: self.rating(rng),
            amenities: self.amenity_subset(HOTEL_AMENITIES, rng),
        }
    }

    /// Origin and destination are drawn independently; the destination is
    /// redrawn until it differs from the origin, capped by ROUTE_RETRY_CAP.
    fn pick_route(&self, rng: &mut impl Rng) -> (String, String) {
        let n = self.config.cities.len();
        let source = rng.gen_range(0..n);
        let mut destination = rng.gen_range(0..n);
        let mut tries = 0;
        while destination == source {
            if tries >= ROUTE_RETRY_CAP {
                destination = (source + 1) % n;
                break;
            }
            destination = rng.gen_range(0..n);
            tries += 1;
        }
        (
            self.config.cities[source].clone(),
            self.config.cities[destination].clone(),
        )
    }

    fn random_date(&self, rng: &mut impl Rng) -> NaiveDate {
        let span = (self.config.date_end - self.config.date_start).num_days();
        self.config.date_start + Duration::days(rng.gen_range(0..=span))
    }

    fn class_fares(&self, rng: &mut impl Rng) -> Vec<ClassFare> {
        let mut classes = Vec::new();
        for class in [
            FareClass::Sleeper,
            FareClass::AcThreeTier,
            FareClass::AcTwoTier,
            FareClass::AcFirst,
        ] {
            if rng.gen_bool(0.75) {
                classes.push(ClassFare {
                    class,
                    price: jitter(self.fares.rate_for(class), rng),
                    availability: self.availability(rng),
                });
            }
        }

        // Every train sells at least one class.
        if classes.is_empty() {
            classes.push(ClassFare {
                class: FareClass::AcThreeTier,
                price: jitter(self.fares.rate_for(FareClass::AcThreeTier), rng),
                availability: self.availability(rng),
            });
        }
        classes
    }

    fn availability(&self, rng: &mut impl Rng) -> Availability {
        match rng.gen_range(0..10) {
            0..=5 => Availability::Available,
            6..=7 => Availability::Rac(rng.gen_range(1..=15)),
            _ => Availability::Waitlist(rng.gen_range(1..=20)),
        }
    }

    fn rating(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(30..=50) as f32 / 10.0
    }

    fn pick(&self, pool: &[String], rng: &mut impl Rng) -> String {
        pool[rng.gen_range(0..pool.len())].clone()
    }

    fn pick_static(&self, pool: &[&str], rng: &mut impl Rng) -> String {
        pool[rng.gen_range(0..pool.len())].to_string()
    }

    fn amenity_subset(&self, pool: &[&str], rng: &mut impl Rng) -> Vec<String> {
        let mut amenities: Vec<String> = pool
            .iter()
            .filter(|_| rng.gen_bool(0.6))
            .map(|a| a.to_string())
            .collect();
        if amenities.is_empty() {
            amenities.push(pool[0].to_string());
        }
        amenities
    }

    fn station_subset(&self, rng: &mut impl Rng) -> Vec<String> {
        let count = rng.gen_range(1..=4.min(self.config.cities.len()));
        let mut stations = Vec::with_capacity(count);
        while stations.len() < count {
            let city = self.pick(&self.config.cities, rng);
            if !stations.contains(&city) {
                stations.push(city);
            }
        }
        stations
    }
}

/// ±20% around the base rate, floored at 1 rupee.
fn jitter(base: i64, rng: &mut impl Rng) -> i64 {
    let factor = rng.gen_range(0.8..1.2);
    ((base as f64 * factor) as i64).max(1)
}

/// Zero-padded "HH:MM". Padding keeps lexicographic time sorts correct.
fn format_time(minutes_of_day: i64) -> String {
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}

fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

const DEFAULT_CITIES: &[&str] = &[
    "Delhi",
    "Mumbai",
    "Chennai",
    "Kolkata",
    "Bangalore",
    "Hyderabad",
    "Ahmedabad",
    "Jaipur",
    "Varanasi",
    "Goa",
    "Lucknow",
    "Amritsar",
    "Pune",
    "Surat",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Bhopal",
    "Patna",
    "Vadodara",
    "Agra",
    "Nashik",
    "Meerut",
    "Rajkot",
    "Jabalpur",
    "Ujjain",
    "Gwalior",
    "Howrah",
    "Guwahati",
    "Bhubaneswar",
    "Cuttack",
    "Rourkela",
    "Jamshedpur",
    "Ranchi",
    "Dhanbad",
    "Thiruvananthapuram",
    "Kochi",
    "Kozhikode",
    "Vijayawada",
    "Visakhapatnam",
    "Tirupati",
    "Madurai",
    "Coimbatore",
    "Salem",
    "Jodhpur",
    "Udaipur",
    "Ajmer",
];

const DEFAULT_TRAIN_NAMES: &[&str] = &[
    "Rajdhani Express",
    "Shatabdi Express",
    "Duronto Express",
    "Garib Rath",
    "Humsafar Express",
    "Tejas Express",
    "Vande Bharat Express",
    "Superfast Express",
    "Mail Express",
    "Intercity Express",
];

const DEFAULT_BUS_OPERATORS: &[&str] = &[
    "IntrCity SmartBus",
    "Orange Travels",
    "VRL Travels",
    "Sharma Transports",
    "Neeta Tours",
    "Parveen Travels",
];

const DEFAULT_HOTEL_NAMES: &[&str] = &[
    "The Grand",
    "Royal Palace",
    "Hotel Heritage",
    "Comfort Inn",
    "Lakeview Residency",
    "Station Retreat",
];

const BUS_TYPES: &[&str] = &[
    "AC Sleeper",
    "AC Seater",
    "Non-AC Sleeper",
    "Volvo Multi-Axle",
];

const BUS_AMENITIES: &[&str] = &["wifi", "charging", "ac", "toilet", "tv", "blanket", "water"];

const HOTEL_AMENITIES: &[&str] = &["wifi", "pool", "parking", "restaurant", "ac", "gym", "spa"];

const MEAL_MENU: &[(&str, &str, MealCategory, i64)] = &[
    (
        "Veg Thali",
        "Dal, paneer, rice, roti, salad and sweet",
        MealCategory::Veg,
        180,
    ),
    (
        "Chicken Biryani",
        "Hyderabadi-style biryani with raita",
        MealCategory::NonVeg,
        220,
    ),
    (
        "Masala Dosa",
        "Crisp dosa with potato filling, sambar and chutney",
        MealCategory::Veg,
        120,
    ),
    (
        "Egg Curry Meal",
        "Egg curry with rice and roti",
        MealCategory::NonVeg,
        160,
    ),
    (
        "Samosa Pack",
        "Two samosas with mint chutney",
        MealCategory::Snacks,
        60,
    ),
    (
        "Veg Sandwich",
        "Grilled vegetable sandwich",
        MealCategory::Snacks,
        80,
    ),
    (
        "Masala Chai",
        "Hot spiced tea, served in kulhad",
        MealCategory::Beverages,
        30,
    ),
    (
        "Cold Coffee",
        "Chilled coffee with ice cream",
        MealCategory::Beverages,
        90,
    ),
    (
        "Family Combo",
        "Two thalis, snacks and beverages",
        MealCategory::Combo,
        450,
    ),
    (
        "Journey Combo",
        "Thali, samosa pack and chai",
        MealCategory::Combo,
        250,
    ),
];
