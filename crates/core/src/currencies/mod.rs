//! Currency registry - static metadata for the currencies the hub trades.

mod currencies_model;
mod currencies_registry;

pub use currencies_model::{CurrencyInfo, CurrencyKind};
pub use currencies_registry::CurrencyRegistry;
