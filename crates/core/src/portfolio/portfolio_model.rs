//! Portfolio and wallet domain models.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::rates::RateCacheSnapshot;
use valutahub_rates::CurrencyPair;

/// A single-currency balance inside a portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub currency_code: String,
    pub balance: Decimal,
}

impl Wallet {
    pub fn new(currency_code: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            balance: Decimal::ZERO,
        }
    }

    /// Credits the wallet. Rejects zero and negative amounts.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        self.balance += amount;
        Ok(())
    }

    /// Debits the wallet. The balance check happens before any mutation,
    /// so a rejected withdrawal leaves the balance exactly as it was.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                currency: self.currency_code.clone(),
                available: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

/// One user's holdings across currencies.
///
/// Wallet access goes through the accessors below so that keys stay
/// normalized to uppercase codes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    user_id: String,
    wallets: HashMap<String, Wallet>,
}

impl Portfolio {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            wallets: HashMap::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn wallets(&self) -> &HashMap<String, Wallet> {
        &self.wallets
    }

    pub fn wallet(&self, currency_code: &str) -> Option<&Wallet> {
        self.wallets.get(&currency_code.to_ascii_uppercase())
    }

    pub fn wallet_mut(&mut self, currency_code: &str) -> Option<&mut Wallet> {
        self.wallets.get_mut(&currency_code.to_ascii_uppercase())
    }

    /// Returns the wallet for a currency, creating a zero-balance wallet
    /// on first use.
    pub fn ensure_wallet(&mut self, currency_code: &str) -> &mut Wallet {
        let code = currency_code.to_ascii_uppercase();
        self.wallets
            .entry(code.clone())
            .or_insert_with(|| Wallet::new(code))
    }

    /// Values the portfolio in `base_currency` against the given rate
    /// snapshot.
    ///
    /// The base-currency wallet counts at face value. Wallets with no
    /// cached rate to the base contribute nothing; the total is a lower
    /// bound when rates are missing, never a guess.
    pub fn total_value(&self, base_currency: &str, rates: &RateCacheSnapshot) -> Decimal {
        let base = base_currency.to_ascii_uppercase();
        let mut total = Decimal::ZERO;

        for wallet in self.wallets.values() {
            if wallet.currency_code == base {
                total += wallet.balance;
                continue;
            }

            let Ok(pair) = CurrencyPair::new(&wallet.currency_code, &base) else {
                debug!("Skipping wallet with malformed code '{}'", wallet.currency_code);
                continue;
            };
            match rates.get(&pair) {
                Some(quote) => total += wallet.balance * quote.rate,
                None => {
                    debug!("No rate for {}, excluding wallet from total", pair);
                }
            }
        }

        total
    }
}

/// Outcome of a completed buy, for user-facing messaging.
///
/// The rate fields are informational only. A missing rate means the cost
/// estimate is unavailable, not that the buy failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyReceipt {
    pub currency: String,
    pub amount: Decimal,
    pub rate: Option<Decimal>,
    pub estimated_cost: Option<Decimal>,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
}

/// Outcome of a completed sell.
#[derive(Debug, Clone, PartialEq)]
pub struct SellReceipt {
    pub currency: String,
    pub amount: Decimal,
    pub rate: Option<Decimal>,
    pub estimated_revenue: Option<Decimal>,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
}
