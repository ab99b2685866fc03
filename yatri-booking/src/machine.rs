use crate::draft::{BookingDraft, Confirmation};
use crate::payment::{PaymentError, PaymentGateway, PaymentStatus};
use crate::seatmap::{SeatMap, SeatMapError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use yatri_core::FareTable;

/// Steps of the booking flow. Advance-only; the reference UI offers no
/// back navigation and no cancellation after confirmation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    JourneyDetails,
    SeatSelection,
    Summary,
    Confirmed,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Missing journey fields: {0}")]
    MissingJourneyFields(String),

    #[error("{action} is not allowed in {state:?}")]
    InvalidTransition {
        state: BookingState,
        action: &'static str,
    },

    #[error("Payment declined; booking remains unconfirmed")]
    PaymentDeclined,

    #[error(transparent)]
    Seat(#[from] SeatMapError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Drives a draft booking through journey details, seat selection, and
/// summary/payment, recomputing the fare on every seat change.
///
/// Fare is always `base_rate(class) × selected seat count`. Advancing to the
/// summary with zero seats is allowed and yields a zero fare, matching the
/// reference flow.
pub struct BookingFlow {
    state: BookingState,
    draft: BookingDraft,
    fares: FareTable,
    seat_map: SeatMap,
    confirmation: Option<Confirmation>,
}

impl BookingFlow {
    pub fn new(fares: FareTable, seat_map: SeatMap) -> Self {
        Self::with_draft(fares, seat_map, BookingDraft::default())
    }

    /// Start from a pre-seeded draft, e.g. built from navigation params.
    pub fn with_draft(fares: FareTable, seat_map: SeatMap, draft: BookingDraft) -> Self {
        Self {
            state: BookingState::JourneyDetails,
            draft,
            fares,
            seat_map,
            confirmation: None,
        }
    }

    pub fn state(&self) -> BookingState {
        self.state
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Edit journey fields; only legal on step 1.
    pub fn edit_journey(
        &mut self,
        edit: impl FnOnce(&mut BookingDraft),
    ) -> Result<(), BookingError> {
        self.require_state(BookingState::JourneyDetails, "editing journey details")?;
        edit(&mut self.draft);
        Ok(())
    }

    /// Advance one step. Step 1 is guarded on the four journey fields; a
    /// failed guard reports what is missing and changes nothing.
    pub fn advance(&mut self) -> Result<BookingState, BookingError> {
        match self.state {
            BookingState::JourneyDetails => {
                let missing = self.draft.missing_journey_fields();
                if !missing.is_empty() {
                    warn!(missing = ?missing, "journey step incomplete");
                    return Err(BookingError::MissingJourneyFields(missing.join(", ")));
                }
                self.transition(BookingState::SeatSelection);
            }
            BookingState::SeatSelection => {
                // Zero seats is a valid (zero-fare) summary.
                self.transition(BookingState::Summary);
            }
            BookingState::Summary => {
                return Err(BookingError::InvalidTransition {
                    state: self.state,
                    action: "advance (confirmation requires payment)",
                });
            }
            BookingState::Confirmed => {
                return Err(BookingError::InvalidTransition {
                    state: self.state,
                    action: "advance",
                });
            }
        }
        Ok(self.state)
    }

    /// Toggle a seat and push the new selection into the draft. Rejected
    /// toggles (booked seats) surface as errors and mutate nothing.
    pub fn toggle_seat(&mut self, id: u32) -> Result<(), BookingError> {
        self.require_state(BookingState::SeatSelection, "seat selection")?;
        self.seat_map.toggle(id)?;
        self.draft.seats = self.seat_map.selection().to_vec();
        self.recompute_fare();
        Ok(())
    }

    /// Settle payment and confirm. On a declined payment the flow stays in
    /// `Summary` with the draft intact, ready for a retry; it never
    /// silently confirms.
    pub async fn pay(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<Confirmation, BookingError> {
        self.require_state(BookingState::Summary, "payment")?;
        match gateway.process(self.draft.fare).await? {
            PaymentStatus::Succeeded => {
                self.transition(BookingState::Confirmed);
                let confirmation = Confirmation::from_draft(&self.draft);
                info!(pnr = %confirmation.pnr, fare = confirmation.fare, "booking confirmed");
                self.confirmation = Some(confirmation.clone());
                Ok(confirmation)
            }
            PaymentStatus::Failed => {
                warn!(fare = self.draft.fare, "payment declined");
                Err(BookingError::PaymentDeclined)
            }
        }
    }

    fn recompute_fare(&mut self) {
        let base = self.fares.base_rate(&self.draft.travel_class);
        self.draft.fare = base * self.draft.seats.len() as i64;
    }

    fn require_state(
        &self,
        expected: BookingState,
        action: &'static str,
    ) -> Result<(), BookingError> {
        if self.state != expected {
            return Err(BookingError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        Ok(())
    }

    fn transition(&mut self, next: BookingState) {
        info!(from = ?self.state, to = ?next, "booking step");
        self.state = next;
    }
}
