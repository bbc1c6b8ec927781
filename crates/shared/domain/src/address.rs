//! Fixed-width identifiers used on chain: account/contract addresses and transaction hashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Failure to parse a `0x`-prefixed hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a {expected_len}-byte hex value")]
pub struct HexParseError {
    pub input: String,
    pub expected_len: usize,
}

/// Drops a leading `0x` or `0X`.
pub(crate) fn strip_hex_prefix(input: &str) -> &str {
    input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input)
}

fn parse_fixed<const N: usize>(input: &str) -> Result<[u8; N], HexParseError> {
    let digits = strip_hex_prefix(input);
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|_| HexParseError { input: input.to_owned(), expected_len: N })?;
    Ok(out)
}

macro_rules! fixed_hex {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Builds the value from the trailing bytes of a longer digest.
            #[must_use]
            pub fn from_tail(digest: &[u8]) -> Self {
                let mut out = [0u8; $len];
                let start = digest.len().saturating_sub($len);
                let tail = &digest[start..];
                out[$len - tail.len()..].copy_from_slice(tail);
                Self(out)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = HexParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_fixed::<$len>(s.trim()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({self})", stringify!($name))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_hex!(
    /// 20-byte account or contract address.
    Address,
    20
);

fixed_hex!(
    /// 32-byte transaction hash.
    TxHash,
    32
);
