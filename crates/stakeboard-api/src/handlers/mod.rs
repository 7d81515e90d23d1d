pub mod protocols;
pub mod staking;
pub mod yields;

pub use protocols::get_protocol_stats;
pub use staking::get_staking_positions;
pub use yields::get_yield_history;
