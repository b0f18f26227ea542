//! Portfolio module - wallets, user portfolios, and ledger operations.

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;

pub use portfolio_model::{BuyReceipt, Portfolio, SellReceipt, Wallet};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
