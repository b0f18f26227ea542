use std::path::PathBuf;

use valutahub_core::errors::Result;
use valutahub_core::settings::Settings;

use crate::store::JsonStore;

const SETTINGS_DOC: &str = "settings.json";

/// Settings document store. A missing document yields the defaults.
pub struct JsonSettingsRepository {
    store: JsonStore,
}

impl JsonSettingsRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: JsonStore::new(dir)?,
        })
    }

    pub fn load(&self) -> Result<Settings> {
        Ok(self.store.load_or_default(SETTINGS_DOC)?)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        Ok(self.store.save(SETTINGS_DOC, settings)?)
    }
}
