use rust_decimal::Decimal;
use stakeboard_subgraph::RawPosition;
use stakeboard_subgraph::types::{EtherFiStaker, LidoUser};
use stakeboard_types::{ParsedAmount, Protocol, StakingPosition, parse_amount};

/// Map a protocol's raw upstream shape onto the common position model.
///
/// A wallet without matching entities gets the zero position of the protocol.
/// Only the first entity is considered, subgraphs key them by wallet id.
pub fn normalize(raw: &RawPosition) -> StakingPosition {
    match raw {
        RawPosition::EtherFi(stakers) => stakers.first().map_or_else(
            || StakingPosition::zero(Protocol::EtherFi),
            normalize_etherfi,
        ),
        RawPosition::Lido(users) => users
            .first()
            .map_or_else(|| StakingPosition::zero(Protocol::Lido), normalize_lido),
        RawPosition::RocketPool => StakingPosition::zero(Protocol::RocketPool),
    }
}

/// ether.fi does not index rewards, they are derived as staked minus
/// withdrawn and never go below zero.
fn normalize_etherfi(staker: &EtherFiStaker) -> StakingPosition {
    let staked = amount(Protocol::EtherFi, "totalStaked", &staker.total_staked);
    let withdrawn = amount(Protocol::EtherFi, "totalWithdrawn", &staker.total_withdrawn);
    let rewards = staked.value.saturating_sub(withdrawn.value).max(Decimal::ZERO);

    StakingPosition::new(Protocol::EtherFi, staked.value, rewards)
        .degraded(staked.degraded || withdrawn.degraded)
}

fn normalize_lido(user: &LidoUser) -> StakingPosition {
    let staked = amount(Protocol::Lido, "totalStaked", &user.total_staked);
    let claimed = amount(Protocol::Lido, "totalClaimed", &user.total_claimed);

    StakingPosition::new(Protocol::Lido, staked.value, claimed.value)
        .degraded(staked.degraded || claimed.degraded)
}

/// Amounts are quantities of ether, a negative value is as unusable as an
/// unparsable one.
fn amount(protocol: Protocol, field: &'static str, raw: &str) -> ParsedAmount {
    let parsed = parse_amount(raw);
    if parsed.degraded {
        tracing::warn!(
            protocol = %protocol,
            field,
            raw,
            "Unparsable upstream amount, reading it as zero"
        );
    } else if parsed.value < Decimal::ZERO {
        tracing::warn!(
            protocol = %protocol,
            field,
            raw,
            "Negative upstream amount, reading it as zero"
        );
        return ParsedAmount {
            value: Decimal::ZERO,
            degraded: true,
        };
    }
    parsed
}
