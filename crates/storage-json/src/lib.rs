//! Valutahub Storage - JSON document store backend.
//!
//! Implements the repository traits defined in `valutahub-core` on top of
//! plain JSON files: one document per concern, replaced atomically, plus
//! a JSON Lines log for rate history. Storage errors are converted into
//! core error types at this boundary.

pub mod errors;
pub mod portfolio;
pub mod rates;
pub mod settings;
mod store;

pub use errors::StorageError;
pub use portfolio::JsonPortfolioRepository;
pub use rates::JsonRateCacheRepository;
pub use settings::JsonSettingsRepository;
pub use store::JsonStore;
