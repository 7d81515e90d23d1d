pub const ETHERFI_STAKE_QUERY: &str = r"
query GetUserStakes($user: String!) {
  stakers(where: { id: $user }) {
    id
    totalStaked
    totalWithdrawn
    stakes {
      amount
      timestamp
      validator {
        id
        status
      }
    }
  }
}
";

pub const LIDO_STAKE_QUERY: &str = r"
query GetLidoStake($user: String!) {
  users(where: { id: $user }) {
    id
    totalStaked
    totalClaimed
  }
}
";

/// Shared by every indexed protocol, only the endpoint differs.
pub const PROTOCOL_TVL_QUERY: &str = r"
query GetProtocolTVL($startTime: Int!) {
  protocolMetrics(
    where: { timestamp_gt: $startTime }
    orderBy: timestamp
    orderDirection: asc
  ) {
    timestamp
    totalValueLocked
    totalStakers
  }
}
";
