use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Membership tiers with their qualifying points and earn bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn threshold(&self) -> i64 {
        match self {
            Tier::Silver => 0,
            Tier::Gold => 2000,
            Tier::Platinum => 4000,
        }
    }

    /// Bonus points earned on top of the base, as a percentage.
    pub fn bonus_percent(&self) -> i64 {
        match self {
            Tier::Silver => 10,
            Tier::Gold => 20,
            Tier::Platinum => 30,
        }
    }

    pub fn for_points(points: i64) -> Tier {
        if points >= Tier::Platinum.threshold() {
            Tier::Platinum
        } else if points >= Tier::Gold.threshold() {
            Tier::Gold
        } else {
            Tier::Silver
        }
    }

    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyActivity {
    pub at: DateTime<Utc>,
    pub action: String,
    /// Positive for earns, negative for redemptions.
    pub points: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierProgress {
    pub current: Tier,
    pub next: Option<Tier>,
    pub points_to_next: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum LoyaltyError {
    #[error("Insufficient points: requested {requested}, available {available}")]
    InsufficientPoints { requested: i64, available: i64 },

    #[error("Points amount must be positive, got {0}")]
    InvalidAmount(i64),
}

/// Points balance with tier promotion on earn.
///
/// Redeeming points never demotes: tier status is kept once earned, only the
/// spendable balance drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    points: i64,
    tier: Tier,
    history: Vec<LoyaltyActivity>,
}

impl Default for LoyaltyAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl LoyaltyAccount {
    pub fn new() -> Self {
        Self {
            points: 0,
            tier: Tier::Silver,
            history: Vec::new(),
        }
    }

    pub fn with_points(points: i64) -> Self {
        let points = points.max(0);
        Self {
            points,
            tier: Tier::for_points(points),
            history: Vec::new(),
        }
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn history(&self) -> &[LoyaltyActivity] {
        &self.history
    }

    /// Credit base points plus the current tier bonus; returns the total
    /// credited. Tier is re-evaluated afterwards.
    pub fn earn(&mut self, base_points: i64, action: &str) -> Result<i64, LoyaltyError> {
        if base_points <= 0 {
            return Err(LoyaltyError::InvalidAmount(base_points));
        }
        let credited = base_points + base_points * self.tier.bonus_percent() / 100;
        self.points += credited;
        let promoted = Tier::for_points(self.points);
        if promoted > self.tier {
            info!(from = ?self.tier, to = ?promoted, "tier promotion");
            self.tier = promoted;
        }
        self.history.push(LoyaltyActivity {
            at: Utc::now(),
            action: action.to_string(),
            points: credited,
        });
        Ok(credited)
    }

    pub fn redeem(&mut self, cost: i64, reward: &str) -> Result<(), LoyaltyError> {
        if cost <= 0 {
            return Err(LoyaltyError::InvalidAmount(cost));
        }
        if cost > self.points {
            return Err(LoyaltyError::InsufficientPoints {
                requested: cost,
                available: self.points,
            });
        }
        self.points -= cost;
        self.history.push(LoyaltyActivity {
            at: Utc::now(),
            action: reward.to_string(),
            points: -cost,
        });
        Ok(())
    }

    pub fn progress(&self) -> TierProgress {
        let next = self.tier.next();
        TierProgress {
            current: self.tier,
            next,
            points_to_next: next
                .map(|t| (t.threshold() - self.points).max(0))
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::for_points(0), Tier::Silver);
        assert_eq!(Tier::for_points(1999), Tier::Silver);
        assert_eq!(Tier::for_points(2000), Tier::Gold);
        assert_eq!(Tier::for_points(4000), Tier::Platinum);
    }

    #[test]
    fn test_earn_applies_tier_bonus() {
        let mut account = LoyaltyAccount::with_points(3450);
        assert_eq!(account.tier(), Tier::Gold);
        // Gold: 20% bonus on a 250-point trip.
        let credited = account.earn(250, "Mumbai - Delhi Trip").unwrap();
        assert_eq!(credited, 300);
        assert_eq!(account.points(), 3750);
    }

    #[test]
    fn test_promotion_on_earn() {
        let mut account = LoyaltyAccount::with_points(1900);
        account.earn(100, "Referred a Friend").unwrap();
        // 100 + 10% bonus crosses the 2000-point Gold threshold.
        assert_eq!(account.points(), 2010);
        assert_eq!(account.tier(), Tier::Gold);
    }

    #[test]
    fn test_redeem_keeps_tier() {
        let mut account = LoyaltyAccount::with_points(4200);
        assert_eq!(account.tier(), Tier::Platinum);
        account.redeem(1500, "Free Meal Voucher").unwrap();
        assert_eq!(account.points(), 2700);
        assert_eq!(account.tier(), Tier::Platinum);
    }

    #[test]
    fn test_insufficient_redeem() {
        let mut account = LoyaltyAccount::with_points(800);
        let err = account.redeem(1200, "Lounge Access").unwrap_err();
        assert!(matches!(err, LoyaltyError::InsufficientPoints { .. }));
        assert_eq!(account.points(), 800);
    }

    #[test]
    fn test_progress_report() {
        let account = LoyaltyAccount::with_points(3450);
        let progress = account.progress();
        assert_eq!(progress.current, Tier::Gold);
        assert_eq!(progress.next, Some(Tier::Platinum));
        assert_eq!(progress.points_to_next, 550);

        let top = LoyaltyAccount::with_points(9000);
        assert_eq!(top.progress().next, None);
        assert_eq!(top.progress().points_to_next, 0);
    }
}
