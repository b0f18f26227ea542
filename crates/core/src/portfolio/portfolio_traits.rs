use async_trait::async_trait;
use rust_decimal::Decimal;

use super::portfolio_model::{BuyReceipt, Portfolio, SellReceipt};
use crate::errors::Result;

/// Contract for durable portfolio storage.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    /// Returns a user's portfolio, or `None` when the user has none yet.
    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Portfolio>>;

    /// Persists a portfolio, replacing the stored copy for that user.
    async fn save(&self, portfolio: &Portfolio) -> Result<()>;
}

/// Contract for portfolio ledger operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Returns the user's portfolio, creating and persisting an empty one
    /// on first access.
    async fn get_user_portfolio(&self, user_id: &str) -> Result<Portfolio>;

    /// Credits `amount` of `currency` to the user, creating the wallet on
    /// first buy. Fails before any mutation on invalid amounts or
    /// unregistered currencies.
    async fn buy_currency(
        &self,
        user_id: &str,
        currency: &str,
        amount: Decimal,
    ) -> Result<BuyReceipt>;

    /// Debits `amount` of `currency` from the user. Fails before any
    /// mutation when the wallet is missing or the balance is too small.
    async fn sell_currency(
        &self,
        user_id: &str,
        currency: &str,
        amount: Decimal,
    ) -> Result<SellReceipt>;
}
