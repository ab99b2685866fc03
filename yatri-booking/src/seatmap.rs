use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SEAT_COUNT: usize = 40;
pub const DEFAULT_BOOKED_PROBABILITY: f64 = 0.3;
pub const DEFAULT_SEAT_PRICE: i64 = 500;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: u32,
    pub status: SeatStatus,
    pub price: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SeatMapError {
    #[error("Seat {0} is already booked")]
    SeatUnavailable(u32),

    #[error("No seat with id {0}")]
    UnknownSeat(u32),
}

/// Fixed-size seat inventory for one booking session.
///
/// Seats marked booked at creation are immutable from the user's
/// perspective; everything else toggles between available and selected.
/// The selection list is kept in click order and always mirrors the set of
/// seats whose status is `Selected`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    seats: Vec<Seat>,
    selection: Vec<u32>,
}

impl SeatMap {
    /// Each seat is independently booked with probability
    /// `booked_probability`, matching the reference's ~70/30 split.
    pub fn new(
        count: usize,
        seat_price: i64,
        booked_probability: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let booked_probability = booked_probability.clamp(0.0, 1.0);
        let seats = (1..=count as u32)
            .map(|id| Seat {
                id,
                status: if rng.gen_bool(booked_probability) {
                    SeatStatus::Booked
                } else {
                    SeatStatus::Available
                },
                price: seat_price,
            })
            .collect();
        Self {
            seats,
            selection: Vec::new(),
        }
    }

    pub fn with_defaults(rng: &mut impl Rng) -> Self {
        Self::new(
            DEFAULT_SEAT_COUNT,
            DEFAULT_SEAT_PRICE,
            DEFAULT_BOOKED_PROBABILITY,
            rng,
        )
    }

    /// Rebuild a map from explicit seats, e.g. for a deterministic layout.
    /// Pre-selected seats enter the selection list in seat order.
    pub fn from_seats(seats: Vec<Seat>) -> Self {
        let selection = seats
            .iter()
            .filter(|s| s.status == SeatStatus::Selected)
            .map(|s| s.id)
            .collect();
        Self { seats, selection }
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Selected seat ids in the order they were clicked.
    pub fn selection(&self) -> &[u32] {
        &self.selection
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Toggle a seat and return its new status.
    ///
    /// Booked seats are rejected without any state change; a second click on
    /// a selected seat releases it.
    pub fn toggle(&mut self, id: u32) -> Result<SeatStatus, SeatMapError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SeatMapError::UnknownSeat(id))?;

        match seat.status {
            SeatStatus::Booked => Err(SeatMapError::SeatUnavailable(id)),
            SeatStatus::Available => {
                seat.status = SeatStatus::Selected;
                self.selection.push(id);
                debug!(seat = id, "seat selected");
                Ok(SeatStatus::Selected)
            }
            SeatStatus::Selected => {
                seat.status = SeatStatus::Available;
                self.selection.retain(|&s| s != id);
                debug!(seat = id, "seat released");
                Ok(SeatStatus::Available)
            }
        }
    }
}
