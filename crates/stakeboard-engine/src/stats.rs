use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, dec};
use stakeboard_types::{Protocol, ProtocolStats, TvlSample};

const DAYS_PER_YEAR: Decimal = dec!(365);
const PERCENT: Decimal = dec!(100);

/// Derive a protocol's stats from a TVL series sorted oldest first.
///
/// The APY is the relative TVL growth between the first and the last sample,
/// linearly extrapolated (×365) and expressed in percent. It is zero when
/// the series is empty or starts at a non-positive TVL. Degraded samples are
/// left out so that an unparsable value never reads as a TVL drop.
pub fn compute_stats(
    protocol: Protocol,
    series: &[TvlSample],
    now: DateTime<Utc>,
) -> ProtocolStats {
    let usable: Vec<&TvlSample> = series.iter().filter(|sample| !sample.degraded).collect();
    if usable.len() < series.len() {
        tracing::warn!(
            protocol = %protocol,
            skipped = series.len() - usable.len(),
            "Ignoring unparsable TVL samples"
        );
    }

    debug_assert!(
        usable.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
        "TVL series must be sorted in chronological order"
    );

    let (Some(first), Some(last)) = (usable.first(), usable.last()) else {
        return ProtocolStats::placeholder(protocol, now);
    };

    let start_tvl = first.total_value_locked;
    let end_tvl = last.total_value_locked;

    ProtocolStats {
        protocol,
        current_apy: annualized_yield(protocol, start_tvl, end_tvl),
        tvl: end_tvl,
        updated_at: now,
    }
}

fn annualized_yield(protocol: Protocol, start_tvl: Decimal, end_tvl: Decimal) -> Decimal {
    if start_tvl <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    end_tvl
        .checked_sub(start_tvl)
        .and_then(|growth| growth.checked_div(start_tvl))
        .and_then(|ratio| ratio.checked_mul(DAYS_PER_YEAR))
        .and_then(|yearly| yearly.checked_mul(PERCENT))
        .unwrap_or_else(|| {
            tracing::warn!(
                protocol = %protocol,
                start_tvl = %start_tvl,
                end_tvl = %end_tvl,
                "APY overflowed, reporting zero"
            );
            Decimal::ZERO
        })
}
