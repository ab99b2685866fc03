use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub category: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Transaction amount must be positive, got {0}")]
    InvalidAmount(i64),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },
}

/// In-app wallet with a full transaction ledger. The balance always equals
/// the opening balance plus credits minus debits; a rejected debit mutates
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    balance: i64,
    transactions: Vec<Transaction>,
}

impl Wallet {
    pub fn new(opening_balance: i64) -> Self {
        Self {
            balance: opening_balance.max(0),
            transactions: Vec::new(),
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn credit(
        &mut self,
        amount: i64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<&Transaction, WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount(amount));
        }
        self.balance += amount;
        info!(amount, balance = self.balance, "wallet credited");
        Ok(self.record(TransactionKind::Credit, amount, description, category))
    }

    pub fn debit(
        &mut self,
        amount: i64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<&Transaction, WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        info!(amount, balance = self.balance, "wallet debited");
        Ok(self.record(TransactionKind::Debit, amount, description, category))
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: i64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> &Transaction {
        self.transactions.push(Transaction {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.into(),
            category: category.into(),
            at: Utc::now(),
        });
        &self.transactions[self.transactions.len() - 1]
    }

    /// Full ledger, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_in(&self, category: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Most recent transactions, newest first, as shown on the wallet card.
    pub fn recent(&self, count: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_math() {
        let mut wallet = Wallet::new(7200);
        wallet.credit(2000, "Top-up", "recharge").unwrap();
        wallet.debit(1200, "Train ticket", "travel").unwrap();
        wallet.debit(600, "Meal order", "food").unwrap();
        assert_eq!(wallet.balance(), 7400);
        assert_eq!(wallet.transactions().len(), 3);
    }

    #[test]
    fn test_insufficient_debit_mutates_nothing() {
        let mut wallet = Wallet::new(100);
        let err = wallet.debit(500, "Hotel", "travel").unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientBalance {
                requested: 500,
                available: 100
            }
        ));
        assert_eq!(wallet.balance(), 100);
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut wallet = Wallet::new(100);
        assert!(wallet.credit(0, "x", "y").is_err());
        assert!(wallet.debit(-5, "x", "y").is_err());
    }

    #[test]
    fn test_category_filter_and_recent() {
        let mut wallet = Wallet::new(10_000);
        wallet.debit(1200, "Ticket A", "travel").unwrap();
        wallet.debit(300, "Chai", "food").unwrap();
        wallet.debit(1500, "Ticket B", "travel").unwrap();

        assert_eq!(wallet.transactions_in("travel").len(), 2);
        let recent = wallet.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "Ticket B");
    }
}
