pub mod protocol_stats;
pub mod wallet_snapshot;

pub use protocol_stats::{NewProtocolStats, ProtocolStatsRecord};
pub use wallet_snapshot::{NewWalletSnapshot, WalletSnapshot};
