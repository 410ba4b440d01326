use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::{
    types::mosaic::{parse_hex_id, ParseIdError},
    utils::sha3_256,
};

// Distinguishes namespace identifiers from mosaic identifiers on the wire.
const NAMESPACE_FLAG: u64 = 1 << 63;

/// A namespace identifier.
///
/// Identifiers are derived from the namespace's fully qualified name: each
/// label's id is the first 8 little-endian bytes of
/// `sha3_256(parent_id ‖ label)` with the high bit set, chained from the root
/// (whose parent id is zero). `cat.token` therefore derives from `cat`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derives the identifier of a fully qualified namespace name, e.g.
    /// `"cat.token"`.
    pub fn from_name(name: &str) -> Self {
        let mut id = 0u64;
        for label in name.split('.') {
            let mut data = Vec::with_capacity(8 + label.len());
            data.extend_from_slice(&id.to_le_bytes());
            data.extend_from_slice(label.as_bytes());
            let digest = sha3_256(&data);
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&digest[..8]);
            id = u64::from_le_bytes(raw) | NAMESPACE_FLAG;
        }
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({self})")
    }
}

impl From<u64> for NamespaceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for NamespaceId {
    type Err = ParseIdError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        parse_hex_id(src).map(Self)
    }
}

impl Serialize for NamespaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NamespaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_ids_have_high_bit_set() {
        assert_ne!(NamespaceId::from_name("cat").as_u64() & NAMESPACE_FLAG, 0);
        assert_ne!(NamespaceId::from_name("cat.token").as_u64() & NAMESPACE_FLAG, 0);
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(NamespaceId::from_name("cat"), NamespaceId::from_name("cat"));
        assert_ne!(NamespaceId::from_name("cat"), NamespaceId::from_name("dog"));
    }

    #[test]
    fn subnamespace_depends_on_parent() {
        assert_ne!(NamespaceId::from_name("cat.token"), NamespaceId::from_name("token"));
        assert_ne!(NamespaceId::from_name("cat.token"), NamespaceId::from_name("dog.token"));
    }

    #[test]
    fn hex_round_trip() {
        let id = NamespaceId::from_name("symbol.xym");
        let back: NamespaceId = id.to_string().parse().unwrap();
        assert_eq!(back, id);
    }
}
