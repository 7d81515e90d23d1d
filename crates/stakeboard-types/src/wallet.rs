use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid wallet address '{0}': expected 0x followed by 40 hex characters")]
pub struct InvalidWalletAddress(pub String);

/// An EVM wallet address, always stored lowercased so that subgraph entity
/// ids and snapshot rows match regardless of the caller's casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for WalletAddress {
    type Err = InvalidWalletAddress;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let valid = trimmed.len() == 42
            && (trimmed.starts_with("0x") || trimmed.starts_with("0X"))
            && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());

        if !valid {
            return Err(InvalidWalletAddress(raw.to_string()));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = InvalidWalletAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
