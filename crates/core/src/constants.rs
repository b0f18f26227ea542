/// Currency every valuation quote is expressed against.
pub const BASE_CURRENCY: &str = "USD";

/// Default freshness threshold for cached rates, in seconds.
pub const DEFAULT_RATES_TTL_SECS: u64 = 300;

/// Origin label written into snapshots produced by the updater.
pub const UPDATER_ORIGIN: &str = "rates-updater";
