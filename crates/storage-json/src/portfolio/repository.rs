use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;

use valutahub_core::errors::Result;
use valutahub_core::portfolio::{Portfolio, PortfolioRepositoryTrait};

use crate::store::JsonStore;

const PORTFOLIOS_DOC: &str = "portfolios.json";

/// Portfolio store backed by one document mapping user id to portfolio.
///
/// Saves are upserts: the document is loaded, the user's entry replaced,
/// and the whole document written back atomically under the write lock.
pub struct JsonPortfolioRepository {
    store: JsonStore,
    lock: RwLock<()>,
}

impl JsonPortfolioRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::new(dir)?,
            lock: RwLock::new(()),
        })
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for JsonPortfolioRepository {
    fn get_by_user_id(&self, user_id: &str) -> Result<Option<Portfolio>> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        let portfolios: HashMap<String, Portfolio> =
            self.store.load_or_default(PORTFOLIOS_DOC)?;
        Ok(portfolios.get(user_id).cloned())
    }

    async fn save(&self, portfolio: &Portfolio) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut portfolios: HashMap<String, Portfolio> =
            self.store.load_or_default(PORTFOLIOS_DOC)?;
        portfolios.insert(portfolio.user_id().to_string(), portfolio.clone());
        self.store.save(PORTFOLIOS_DOC, &portfolios)?;
        debug!("Saved portfolio for user '{}'", portfolio.user_id());
        Ok(())
    }
}
