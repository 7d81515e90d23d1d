use std::time::Duration;

/// Runtime behaviour of the staking engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay between two protocol statistics refresh passes.
    pub refresh_interval: Duration,
    /// Trailing window of TVL samples used to derive the APY.
    pub tvl_window: chrono::Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(15 * 60),
            tvl_window: chrono::Duration::hours(24),
        }
    }
}
