//! Data-source adapter: queries protocol subgraphs over GraphQL and hands
//! back their raw, protocol-specific shapes.

pub mod error;
pub mod queries;
pub mod source;
pub mod traits;
pub mod transport;
pub mod types;

pub use error::{DataSourceError, TransportError};
pub use source::{SubgraphDataSource, SubgraphEndpoints};
pub use traits::{RawPosition, StakingDataSource};
pub use transport::{GraphQlTransport, HttpGraphQlTransport};
