use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The train a booking was entered from, carried over from the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainRef {
    pub number: String,
    pub name: String,
}

/// The in-progress booking accumulated across the three-step flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingDraft {
    pub origin: String,
    pub destination: String,
    pub date: Option<NaiveDate>,
    /// Class label as entered; fare lookup tolerates unknown labels.
    pub travel_class: String,
    /// Selected seat ids in click order.
    pub seats: Vec<u32>,
    pub fare: i64,
    pub train: Option<TrainRef>,
}

impl BookingDraft {
    /// Seed a draft from navigation-carried key/value pairs, as when the
    /// booking flow is entered from a listing row. Unknown keys are ignored.
    pub fn from_nav_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut draft = BookingDraft::default();
        let mut train_number = None;
        let mut train_name = None;
        for (key, value) in params {
            match key {
                "from" | "origin" | "source" => draft.origin = value.to_string(),
                "to" | "destination" => draft.destination = value.to_string(),
                "date" => draft.date = value.parse().ok(),
                "class" => draft.travel_class = value.to_string(),
                "train_number" => train_number = Some(value.to_string()),
                "train_name" => train_name = Some(value.to_string()),
                _ => {}
            }
        }
        if let (Some(number), Some(name)) = (train_number, train_name) {
            draft.train = Some(TrainRef { number, name });
        }
        draft
    }

    /// Fields still required before step 1 can advance.
    pub fn missing_journey_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.origin.is_empty() {
            missing.push("origin");
        }
        if self.destination.is_empty() {
            missing.push("destination");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.travel_class.is_empty() {
            missing.push("class");
        }
        missing
    }

    pub fn is_journey_complete(&self) -> bool {
        self.missing_journey_fields().is_empty()
    }
}

/// Read-only echo of a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub booking_id: Uuid,
    pub pnr: String,
    pub origin: String,
    pub destination: String,
    pub date: Option<NaiveDate>,
    pub travel_class: String,
    pub seats: Vec<u32>,
    pub fare: i64,
    pub train: Option<TrainRef>,
    pub confirmed_at: DateTime<Utc>,
}

impl Confirmation {
    pub fn from_draft(draft: &BookingDraft) -> Self {
        let booking_id = Uuid::new_v4();
        Self {
            booking_id,
            pnr: format!("{:010}", booking_id.as_u128() % 10_000_000_000),
            origin: draft.origin.clone(),
            destination: draft.destination.clone(),
            date: draft.date,
            travel_class: draft.travel_class.clone(),
            seats: draft.seats.clone(),
            fare: draft.fare,
            train: draft.train.clone(),
            confirmed_at: Utc::now(),
        }
    }
}
