pub mod amount;
pub mod position;
pub mod protocol;
pub mod stats;
pub mod wallet;

pub use amount::{ParsedAmount, parse_amount};
pub use position::{StakingPosition, YieldPoint};
pub use protocol::Protocol;
pub use stats::{ProtocolStats, TvlSample};
pub use wallet::{InvalidWalletAddress, WalletAddress};
