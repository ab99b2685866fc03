pub mod draft;
pub mod machine;
pub mod payment;
pub mod seatmap;

pub use draft::{BookingDraft, Confirmation, TrainRef};
pub use machine::{BookingError, BookingFlow, BookingState};
pub use payment::{DecliningGateway, InstantGateway, PaymentError, PaymentGateway, PaymentStatus};
pub use seatmap::{Seat, SeatMap, SeatMapError, SeatStatus};
