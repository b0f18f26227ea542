use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::portfolio_model::{BuyReceipt, Portfolio, SellReceipt};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::currencies::CurrencyRegistry;
use crate::errors::{LedgerError, Result};
use crate::rates::ExchangeRateServiceTrait;

/// Ledger operations over user portfolios.
///
/// Mutations to one user's portfolio are serialized through a per-user
/// lock, so two concurrent trades for the same user apply one after the
/// other. Different users never contend.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    rate_service: Arc<dyn ExchangeRateServiceTrait>,
    currencies: Arc<CurrencyRegistry>,
    base_currency: String,
    /// One entry per user id ever traded, never evicted. Growth is bounded
    /// by the user population, not by operation count.
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        rate_service: Arc<dyn ExchangeRateServiceTrait>,
        currencies: Arc<CurrencyRegistry>,
        base_currency: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            rate_service,
            currencies,
            base_currency: base_currency.into(),
            user_locks: DashMap::new(),
        }
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Rate to the base currency, for receipt estimates only. Lookup
    /// failures degrade to "no estimate" rather than failing the trade.
    fn informational_rate(&self, currency: &str) -> Option<Decimal> {
        match self.rate_service.get_rate(currency, &self.base_currency) {
            Ok(rate) => {
                if rate.is_none() {
                    debug!(
                        "No cached {}/{} rate for receipt estimate",
                        currency, self.base_currency
                    );
                }
                rate
            }
            Err(e) => {
                warn!("Rate lookup for receipt estimate failed: {}", e);
                None
            }
        }
    }

    async fn load_or_create(&self, user_id: &str) -> Result<Portfolio> {
        match self.repository.get_by_user_id(user_id)? {
            Some(portfolio) => Ok(portfolio),
            None => {
                debug!("Creating empty portfolio for user '{}'", user_id);
                let portfolio = Portfolio::new(user_id);
                self.repository.save(&portfolio).await?;
                Ok(portfolio)
            }
        }
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_user_portfolio(&self, user_id: &str) -> Result<Portfolio> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        self.load_or_create(user_id).await
    }

    async fn buy_currency(
        &self,
        user_id: &str,
        currency: &str,
        amount: Decimal,
    ) -> Result<BuyReceipt> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount }.into());
        }
        let currency = self.currencies.get(currency)?.code.clone();

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let mut portfolio = self.load_or_create(user_id).await?;
        let wallet = portfolio.ensure_wallet(&currency);
        let old_balance = wallet.balance;
        wallet.deposit(amount)?;
        let new_balance = wallet.balance;

        self.repository.save(&portfolio).await?;

        let rate = self.informational_rate(&currency);
        info!(
            "User '{}' bought {} {} (balance {} -> {})",
            user_id, amount, currency, old_balance, new_balance
        );

        Ok(BuyReceipt {
            estimated_cost: rate.map(|r| amount * r),
            currency,
            amount,
            rate,
            old_balance,
            new_balance,
        })
    }

    async fn sell_currency(
        &self,
        user_id: &str,
        currency: &str,
        amount: Decimal,
    ) -> Result<SellReceipt> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount }.into());
        }
        let currency = self.currencies.get(currency)?.code.clone();

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let mut portfolio = self
            .repository
            .get_by_user_id(user_id)?
            .ok_or_else(|| LedgerError::WalletNotFound(currency.clone()))?;
        let wallet = portfolio
            .wallet_mut(&currency)
            .ok_or_else(|| LedgerError::WalletNotFound(currency.clone()))?;

        let old_balance = wallet.balance;
        wallet.withdraw(amount)?;
        let new_balance = wallet.balance;

        self.repository.save(&portfolio).await?;

        let rate = self.informational_rate(&currency);
        info!(
            "User '{}' sold {} {} (balance {} -> {})",
            user_id, amount, currency, old_balance, new_balance
        );

        Ok(SellReceipt {
            estimated_revenue: rate.map(|r| amount * r),
            currency,
            amount,
            rate,
            old_balance,
            new_balance,
        })
    }
}
