use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seat availability for a train or a single fare class.
///
/// `Rac(0)` renders as a bare "RAC" (the listing sometimes shows the status
/// without a queue position).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    Available,
    Rac(u32),
    Waitlist(u32),
}

impl Availability {
    pub fn bucket(&self) -> AvailabilityBucket {
        match self {
            Availability::Available => AvailabilityBucket::Available,
            Availability::Rac(_) => AvailabilityBucket::Rac,
            Availability::Waitlist(_) => AvailabilityBucket::Waitlist,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Rac(0) => write!(f, "RAC"),
            Availability::Rac(n) => write!(f, "RAC {n}"),
            Availability::Waitlist(n) => write!(f, "WL {n}"),
        }
    }
}

impl FromStr for Availability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("available") {
            return Ok(Availability::Available);
        }
        let parse_position = |rest: &str| -> Result<u32, CoreError> {
            let rest = rest.trim();
            if rest.is_empty() {
                return Ok(0);
            }
            rest.parse::<u32>()
                .map_err(|_| CoreError::Validation(format!("bad availability position: {rest:?}")))
        };
        if let Some(rest) = trimmed
            .strip_prefix("RAC")
            .or_else(|| trimmed.strip_prefix("rac"))
        {
            return Ok(Availability::Rac(parse_position(rest)?));
        }
        if let Some(rest) = trimmed
            .strip_prefix("WL")
            .or_else(|| trimmed.strip_prefix("wl"))
        {
            return Ok(Availability::Waitlist(parse_position(rest)?));
        }
        Err(CoreError::Validation(format!(
            "unrecognized availability: {trimmed:?}"
        )))
    }
}

/// Coarse availability filter used by the listing pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityBucket {
    Available,
    Rac,
    Waitlist,
}

impl AvailabilityBucket {
    pub fn matches(&self, availability: &Availability) -> bool {
        availability.bucket() == *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(Availability::Available.to_string(), "Available");
        assert_eq!(Availability::Rac(12).to_string(), "RAC 12");
        assert_eq!(Availability::Rac(0).to_string(), "RAC");
        assert_eq!(Availability::Waitlist(5).to_string(), "WL 5");
    }

    #[test]
    fn test_parse_round_trip() {
        for text in ["Available", "RAC 12", "RAC", "WL 5"] {
            let parsed: Availability = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("Sold Out".parse::<Availability>().is_err());
        assert!("WL five".parse::<Availability>().is_err());
    }

    #[test]
    fn test_bucket_matching() {
        assert!(AvailabilityBucket::Waitlist.matches(&Availability::Waitlist(4)));
        assert!(!AvailabilityBucket::Available.matches(&Availability::Rac(2)));
    }
}
