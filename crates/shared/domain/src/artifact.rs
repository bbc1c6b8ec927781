use crate::address::strip_hex_prefix;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Raw contract creation code.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytecode(Vec<u8>);

impl Bytecode {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parses `0x`/`0X`-prefixed (or bare) hex. An empty string or a lone `0x` yields empty code.
    ///
    /// # Errors
    /// Returns the hex decoding error for odd-length or non-hex input.
    pub fn from_hex(input: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(strip_hex_prefix(input.trim())).map(Self)
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl Deref for Bytecode {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Bytecode {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytecode({} bytes)", self.0.len())
    }
}

impl Serialize for Bytecode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytecode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Compiled output for a named contract, as produced by the external build step.
///
/// Field names follow the compiler artifact layout (`contractName`, `abi`, `bytecode`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: Bytecode,
}

impl Artifact {
    pub fn new(contract_name: impl Into<String>, bytecode: impl Into<Bytecode>) -> Self {
        Self {
            contract_name: contract_name.into(),
            abi: serde_json::Value::Array(Vec::new()),
            bytecode: bytecode.into(),
        }
    }
}
