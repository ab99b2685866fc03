pub mod availability;
pub mod fare;

pub use availability::{Availability, AvailabilityBucket};
pub use fare::{FareClass, FareTable};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
