use ed25519_dalek::{Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// An error involving a key or signature.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Invalid length for a key or signature
    #[error("invalid length, got {got}, expected {expected}")]
    InvalidLength {
        /// Number of bytes received
        got: usize,
        /// Number of bytes required
        expected: usize,
    },
    /// When parsing from a hex string
    #[error(transparent)]
    DecodingError(#[from] hex::FromHexError),
    /// The bytes do not describe a valid curve point
    #[error("invalid ed25519 public key")]
    InvalidPublicKey,
    /// Thrown when signature verification failed
    #[error("signature verification failed")]
    VerificationError,
}

/// An ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Length of a public key in bytes.
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verifies that `signature` over `data` was produced by this key.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| SignatureError::InvalidPublicKey)?;
        let signature = ed25519_dalek::Signature::from_bytes(&signature.0);
        key.verify(data, &signature).map_err(|_| SignatureError::VerificationError)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for PublicKey {
    type Err = SignatureError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(src)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| SignatureError::InvalidLength { got: b.len(), expected: 32 })?;
        Ok(Self(bytes))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub(crate) [u8; 64]);

impl Signature {
    /// Length of a signature in bytes.
    pub const LEN: usize = 64;

    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(src)?;
        let bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| SignatureError::InvalidLength { got: b.len(), expected: 64 })?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_hex() {
        let hex = "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A";
        let key: PublicKey = hex.parse().unwrap();
        assert_eq!(key.to_string(), hex);
        // lowercase input is accepted
        let key2: PublicKey = hex.to_lowercase().parse().unwrap();
        assert_eq!(key, key2);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "D75A".parse::<PublicKey>().unwrap_err();
        assert!(matches!(err, SignatureError::InvalidLength { got: 2, expected: 32 }));
    }

    #[test]
    // RFC 8032 §7.1 test 1
    fn verifies_rfc8032_vector() {
        let key: PublicKey =
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a".parse().unwrap();
        let signature: Signature =
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
                .parse()
                .unwrap();
        key.verify(b"", &signature).unwrap();
        assert!(key.verify(b"tampered", &signature).is_err());
    }
}
