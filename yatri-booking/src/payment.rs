use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider unreachable: {0}")]
    Provider(String),
}

/// Seam to the payment provider. A declined payment is a `Failed` status,
/// not an error; `PaymentError` is reserved for transport problems. Both
/// leave the booking retriable.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process(&self, amount: i64) -> Result<PaymentStatus, PaymentError>;
}

/// Simulated gateway that always settles, optionally after an artificial
/// processing delay. Mirrors the reference behavior, where payment never
/// fails.
#[derive(Debug, Clone, Default)]
pub struct InstantGateway {
    pub delay: Option<Duration>,
}

impl InstantGateway {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }
}

#[async_trait]
impl PaymentGateway for InstantGateway {
    async fn process(&self, _amount: i64) -> Result<PaymentStatus, PaymentError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(PaymentStatus::Succeeded)
    }
}

/// Gateway that declines everything, for exercising the failure path.
#[derive(Debug, Clone, Default)]
pub struct DecliningGateway;

#[async_trait]
impl PaymentGateway for DecliningGateway {
    async fn process(&self, _amount: i64) -> Result<PaymentStatus, PaymentError> {
        Ok(PaymentStatus::Failed)
    }
}
