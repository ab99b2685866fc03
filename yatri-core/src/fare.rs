use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Travel tiers offered on Indian Railways services.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FareClass {
    Sleeper,
    AcThreeTier,
    AcTwoTier,
    AcFirst,
    General,
}

impl FareClass {
    pub const ALL: [FareClass; 5] = [
        FareClass::Sleeper,
        FareClass::AcThreeTier,
        FareClass::AcTwoTier,
        FareClass::AcFirst,
        FareClass::General,
    ];

    /// Short booking code, e.g. "3A".
    pub fn code(&self) -> &'static str {
        match self {
            FareClass::Sleeper => "SL",
            FareClass::AcThreeTier => "3A",
            FareClass::AcTwoTier => "2A",
            FareClass::AcFirst => "1A",
            FareClass::General => "GN",
        }
    }

    /// Human-readable label shown on booking forms.
    pub fn label(&self) -> &'static str {
        match self {
            FareClass::Sleeper => "Sleeper",
            FareClass::AcThreeTier => "AC 3-Tier",
            FareClass::AcTwoTier => "AC 2-Tier",
            FareClass::AcFirst => "AC First Class",
            FareClass::General => "General",
        }
    }

    pub fn is_ac(&self) -> bool {
        matches!(
            self,
            FareClass::AcThreeTier | FareClass::AcTwoTier | FareClass::AcFirst
        )
    }

    /// Accepts either the booking code or the display label, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim();
        Self::ALL.iter().copied().find(|class| {
            class.code().eq_ignore_ascii_case(normalized)
                || class.label().eq_ignore_ascii_case(normalized)
        })
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Base fare per seat, keyed by class.
///
/// Lookups never fail: an unrecognized class falls back to the cheapest
/// configured rate so a stale class label coming from the view layer cannot
/// break fare computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareTable {
    rates: HashMap<String, i64>,
    fallback: i64,
}

impl Default for FareTable {
    fn default() -> Self {
        let mut rates = HashMap::new();
        rates.insert("SL".to_string(), 750);
        rates.insert("3A".to_string(), 1200);
        rates.insert("2A".to_string(), 2200);
        rates.insert("1A".to_string(), 3800);
        rates.insert("GN".to_string(), 500);
        Self {
            rates,
            fallback: 500,
        }
    }
}

impl FareTable {
    pub fn new(rates: HashMap<String, i64>, fallback: i64) -> Self {
        Self { rates, fallback }
    }

    pub fn set_rate(&mut self, class: impl Into<String>, rate: i64) {
        self.rates.insert(class.into(), rate);
    }

    /// Resolve the base rate for a class given by code or label.
    pub fn base_rate(&self, class: &str) -> i64 {
        if let Some(rate) = self.rates.get(class) {
            return *rate;
        }
        if let Some(parsed) = FareClass::parse(class) {
            if let Some(rate) = self.rates.get(parsed.code()) {
                return *rate;
            }
        }
        self.fallback
    }

    pub fn rate_for(&self, class: FareClass) -> i64 {
        self.base_rate(class.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_and_label() {
        assert_eq!(FareClass::parse("3A"), Some(FareClass::AcThreeTier));
        assert_eq!(FareClass::parse("sl"), Some(FareClass::Sleeper));
        assert_eq!(FareClass::parse("AC First Class"), Some(FareClass::AcFirst));
        assert_eq!(FareClass::parse("Business"), None);
    }

    #[test]
    fn test_default_rates() {
        let table = FareTable::default();
        assert_eq!(table.base_rate("3A"), 1200);
        assert_eq!(table.base_rate("1A"), 3800);
        assert_eq!(table.rate_for(FareClass::Sleeper), 750);
    }

    #[test]
    fn test_label_resolves_to_code_rate() {
        let table = FareTable::default();
        assert_eq!(table.base_rate("AC 2-Tier"), 2200);
    }

    #[test]
    fn test_unknown_class_falls_back_to_lowest_tier() {
        let table = FareTable::default();
        assert_eq!(table.base_rate("Luxury Saloon"), 500);
    }
}
