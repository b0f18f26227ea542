use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;

use valutahub_core::errors::Result;
use valutahub_core::rates::{RateCacheRepositoryTrait, RateCacheSnapshot, RateHistoryRecord};

use crate::store::JsonStore;

const CURRENT_RATES_DOC: &str = "current_rates.json";
const RATES_HISTORY_DOC: &str = "rates_history.jsonl";

/// Rate cache store backed by two documents: the current snapshot and an
/// append-only history log.
///
/// The in-process lock pairs with the store's rename-based replacement:
/// the rename keeps on-disk state consistent, the lock keeps readers in
/// this process from racing a writer mid-update.
pub struct JsonRateCacheRepository {
    store: JsonStore,
    lock: RwLock<()>,
}

impl JsonRateCacheRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::new(dir)?,
            lock: RwLock::new(()),
        })
    }

    /// Full fetch history, oldest record first.
    pub fn load_history(&self) -> Result<Vec<RateHistoryRecord>> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        Ok(self.store.read_lines(RATES_HISTORY_DOC)?)
    }
}

#[async_trait]
impl RateCacheRepositoryTrait for JsonRateCacheRepository {
    fn load_current(&self) -> Result<RateCacheSnapshot> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        Ok(self.store.load_or_default(CURRENT_RATES_DOC)?)
    }

    async fn save_current(&self, snapshot: &RateCacheSnapshot) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        self.store.save(CURRENT_RATES_DOC, snapshot)?;
        debug!("Saved rate snapshot with {} pair(s)", snapshot.len());
        Ok(())
    }

    async fn append_history(&self, records: &[RateHistoryRecord]) -> Result<()> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        self.store.append_lines(RATES_HISTORY_DOC, records)?;
        debug!("Appended {} history record(s)", records.len());
        Ok(())
    }
}
