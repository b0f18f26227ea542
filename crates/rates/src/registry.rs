//! Fixed table of rate sources, keyed by source name.
//!
//! Built once at startup and passed explicitly to whoever needs to fan
//! out over sources; there is no global source state.

use std::sync::Arc;

use crate::source::RateSource;

/// Registry of configured rate sources.
pub struct SourceRegistry {
    sources: Vec<Arc<dyn RateSource>>,
}

impl SourceRegistry {
    pub fn new(sources: Vec<Arc<dyn RateSource>>) -> Self {
        Self { sources }
    }

    /// Looks a source up by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<Arc<dyn RateSource>> {
        self.sources
            .iter()
            .find(|s| s.id().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// All configured sources, in registration order.
    pub fn all(&self) -> &[Arc<dyn RateSource>] {
        &self.sources
    }

    /// Names of all configured sources, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.id()).collect()
    }
}
