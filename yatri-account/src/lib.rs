pub mod loyalty;
pub mod wallet;

pub use loyalty::{LoyaltyAccount, LoyaltyError, Tier, TierProgress};
pub use wallet::{Transaction, TransactionKind, Wallet, WalletError};
