use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The networks a transaction can be valid for.
///
/// Every address and every signed payload carries the network's wire
/// identifier, so payloads built for one network are rejected by the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkType {
    MainNet,
    TestNet,
    Mijin,
    MijinTest,
}

/// An invalid network name or wire identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown network type: {0}")]
pub struct ParseNetworkError(pub String);

impl NetworkType {
    /// The identifier byte carried by addresses and transaction payloads.
    pub const fn wire_id(&self) -> u8 {
        match self {
            NetworkType::MainNet => 104,
            NetworkType::TestNet => 152,
            NetworkType::Mijin => 96,
            NetworkType::MijinTest => 144,
        }
    }

    /// The canonical name used by flags and profiles.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "MAIN_NET",
            NetworkType::TestNet => "TEST_NET",
            NetworkType::Mijin => "MIJIN",
            NetworkType::MijinTest => "MIJIN_TEST",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NetworkType> for u8 {
    fn from(network: NetworkType) -> Self {
        network.wire_id()
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = ParseNetworkError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            104 => Ok(NetworkType::MainNet),
            152 => Ok(NetworkType::TestNet),
            96 => Ok(NetworkType::Mijin),
            144 => Ok(NetworkType::MijinTest),
            other => Err(ParseNetworkError(other.to_string())),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MAIN_NET" | "MAINNET" => Ok(NetworkType::MainNet),
            "TEST_NET" | "TESTNET" => Ok(NetworkType::TestNet),
            "MIJIN" => Ok(NetworkType::Mijin),
            "MIJIN_TEST" | "MIJINTEST" => Ok(NetworkType::MijinTest),
            other => Err(ParseNetworkError(other.to_string())),
        }
    }
}

impl Serialize for NetworkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
