use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::{
    types::{NetworkType, ParseNetworkError, PublicKey},
    utils::{base32_decode, base32_encode, ripemd160, sha3_256, Base32DecodeError},
};

/// An error involving an address.
#[derive(Debug, Error)]
pub enum AddressError {
    /// Invalid length, raw addresses are 24 bytes / 39 characters
    #[error("invalid address length, got {0}, expected {1}")]
    InvalidLength(usize, usize),
    /// When parsing an address from base32
    #[error(transparent)]
    DecodingError(#[from] Base32DecodeError),
    /// The checksum bytes do not match the address body
    #[error("address checksum mismatch")]
    ChecksumMismatch,
    /// The network identifier byte is not a known network
    #[error(transparent)]
    UnknownNetwork(#[from] ParseNetworkError),
}

/// A Symbol account address.
///
/// The 24 raw bytes are `network ‖ ripemd160(sha3_256(public_key)) ‖
/// checksum`, where the checksum is the first 3 bytes of the SHA3-256 hash of
/// the preceding 21 bytes. Addresses display as 39 base32 characters, with an
/// optional hyphenated "pretty" form.
///
/// ```
/// use symbol_core::types::{Address, NetworkType, PublicKey};
///
/// let key: PublicKey =
///     "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap();
/// let address = Address::from_public_key(&key, NetworkType::TestNet);
/// assert_eq!(address.encoded().len(), Address::ENCODED_LEN);
/// assert_eq!(address.encoded(), address.pretty().replace('-', ""));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 24]);

impl Address {
    /// Length of a raw address in bytes.
    pub const LEN: usize = 24;
    /// Length of an encoded address in characters.
    pub const ENCODED_LEN: usize = 39;

    const CHECKSUM_LEN: usize = 3;

    /// Derives the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let digest = ripemd160(sha3_256(public_key.as_bytes()));

        let mut bytes = [0u8; Self::LEN];
        bytes[0] = network.wire_id();
        bytes[1..21].copy_from_slice(&digest);
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..Self::CHECKSUM_LEN]);
        Self(bytes)
    }

    /// Parses an encoded address, accepting both the plain and the
    /// hyphenated pretty form. The checksum and network byte are validated.
    pub fn from_encoded(encoded: &str) -> Result<Self, AddressError> {
        let plain: String = encoded.chars().filter(|c| *c != '-').collect();
        if plain.len() != Self::ENCODED_LEN {
            return Err(AddressError::InvalidLength(plain.len(), Self::ENCODED_LEN))
        }
        let raw = base32_decode(&plain)?;
        let bytes: [u8; Self::LEN] =
            raw.try_into().map_err(|b: Vec<u8>| AddressError::InvalidLength(b.len(), Self::LEN))?;

        let checksum = sha3_256(&bytes[..21]);
        if checksum[..Self::CHECKSUM_LEN] != bytes[21..] {
            return Err(AddressError::ChecksumMismatch)
        }
        NetworkType::try_from(bytes[0])?;
        Ok(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 24] {
        &self.0
    }

    /// The network this address belongs to.
    pub fn network_type(&self) -> Result<NetworkType, ParseNetworkError> {
        NetworkType::try_from(self.0[0])
    }

    /// The plain 39-character encoded form.
    pub fn encoded(&self) -> String {
        base32_encode(&self.0)
    }

    /// The hyphenated display form, `XXXXXX-...-XXX`.
    pub fn pretty(&self) -> String {
        let encoded = self.encoded();
        encoded
            .as_bytes()
            .chunks(6)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encoded())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_encoded(src)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_encoded(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> PublicKey {
        "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap()
    }

    #[test]
    fn derives_and_round_trips() {
        let address = Address::from_public_key(&test_key(), NetworkType::TestNet);
        let encoded = address.encoded();
        assert_eq!(encoded.len(), Address::ENCODED_LEN);
        assert_eq!(Address::from_encoded(&encoded).unwrap(), address);
        assert_eq!(address.network_type().unwrap(), NetworkType::TestNet);
    }

    #[test]
    fn networks_produce_distinct_addresses() {
        let mainnet = Address::from_public_key(&test_key(), NetworkType::MainNet);
        let testnet = Address::from_public_key(&test_key(), NetworkType::TestNet);
        assert_ne!(mainnet, testnet);
        assert_eq!(mainnet.as_bytes()[1..21], testnet.as_bytes()[1..21]);
    }

    #[test]
    fn pretty_form_parses() {
        let address = Address::from_public_key(&test_key(), NetworkType::MainNet);
        let pretty = address.pretty();
        assert_eq!(pretty.matches('-').count(), 6);
        assert_eq!(pretty.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let address = Address::from_public_key(&test_key(), NetworkType::TestNet);
        let mut encoded = address.encoded().into_bytes();
        // flip one character of the body
        encoded[10] = if encoded[10] == b'A' { b'B' } else { b'A' };
        let corrupted = String::from_utf8(encoded).unwrap();
        assert!(matches!(
            Address::from_encoded(&corrupted),
            Err(AddressError::ChecksumMismatch) | Err(AddressError::DecodingError(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Address::from_encoded("TDWZ55"),
            Err(AddressError::InvalidLength(6, Address::ENCODED_LEN))
        ));
    }

    #[test]
    fn serde_round_trip() {
        let address = Address::from_public_key(&test_key(), NetworkType::Mijin);
        let json = serde_json::to_string(&address).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
