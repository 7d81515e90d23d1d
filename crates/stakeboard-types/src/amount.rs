use std::str::FromStr;

use rust_decimal::Decimal;

/// A decimal parsed from an upstream string, remembering whether the raw
/// value had to be replaced by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedAmount {
    pub value: Decimal,
    pub degraded: bool,
}

impl ParsedAmount {
    pub const fn exact(value: Decimal) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    const fn fallback() -> Self {
        Self {
            value: Decimal::ZERO,
            degraded: true,
        }
    }
}

/// Best-effort parse of a subgraph numeric string (`BigInt`/`BigDecimal`
/// scalars are sent as strings). Plain and scientific notation are accepted;
/// anything else falls back to zero with `degraded` set.
pub fn parse_amount(raw: &str) -> ParsedAmount {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedAmount::fallback();
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_or_else(|_| ParsedAmount::fallback(), ParsedAmount::exact)
}
