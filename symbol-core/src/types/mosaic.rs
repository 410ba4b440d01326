use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// An error parsing a mosaic or namespace identifier.
#[derive(Debug, Error)]
pub enum ParseIdError {
    /// Identifiers are 8 bytes / 16 hex characters
    #[error("invalid identifier length, got {0} hex characters, expected 16")]
    InvalidLength(usize),
    /// When parsing from hex
    #[error(transparent)]
    DecodingError(#[from] hex::FromHexError),
}

/// A mosaic identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MosaicId(u64);

impl MosaicId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({self})")
    }
}

impl From<u64> for MosaicId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for MosaicId {
    type Err = ParseIdError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        parse_hex_id(src).map(Self)
    }
}

impl Serialize for MosaicId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MosaicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A quantity of a mosaic, in absolute (indivisible) units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: u64,
}

impl Mosaic {
    pub const fn new(id: MosaicId, amount: u64) -> Self {
        Self { id, amount }
    }
}

pub(crate) fn parse_hex_id(src: &str) -> Result<u64, ParseIdError> {
    if src.len() != 16 {
        return Err(ParseIdError::InvalidLength(src.len()))
    }
    let bytes = hex::decode(src)?;
    let bytes: [u8; 8] =
        bytes.try_into().map_err(|b: Vec<u8>| ParseIdError::InvalidLength(b.len() * 2))?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let id: MosaicId = "0DC67FBE1CAD29E3".parse().unwrap();
        assert_eq!(id.as_u64(), 0x0DC67FBE1CAD29E3);
        assert_eq!(id.to_string(), "0DC67FBE1CAD29E3");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("0DC6".parse::<MosaicId>(), Err(ParseIdError::InvalidLength(4))));
        assert!(matches!(
            "ZDC67FBE1CAD29E3".parse::<MosaicId>(),
            Err(ParseIdError::DecodingError(_))
        ));
    }

    #[test]
    fn serde_uses_hex() {
        let mosaic = Mosaic::new(MosaicId::new(0x0DC67FBE1CAD29E3), 10_000_000);
        let json = serde_json::to_value(&mosaic).unwrap();
        assert_eq!(json["id"], "0DC67FBE1CAD29E3");
        let back: Mosaic = serde_json::from_value(json).unwrap();
        assert_eq!(back, mosaic);
    }
}
