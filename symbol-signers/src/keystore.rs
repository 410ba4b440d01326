//! Encrypted private key format (Argon2id + XChaCha20-Poly1305).
//!
//! Profiles never persist a private key in the clear. The key is sealed into
//! a self describing blob whose header (magic, version, KDF parameters, salt,
//! nonce) doubles as the AEAD associated data, and the blob is armored as hex
//! so it can live inside a JSON profile store.

use argon2::{Argon2, ParamsBuilder, Version};
use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::XChaCha20Poly1305;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use zeroize::Zeroizing;

const MAGIC: [u8; 4] = *b"SEPK";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 1 + 12 + 32 + 24;

/// Length of the sealed secret, i.e. an Ed25519 private key.
const SECRET_LEN: usize = 32;

/// Error thrown by the keystore module
#[derive(Debug, Error)]
pub enum KeystoreError {
    /// The blob does not start with the keystore magic bytes
    #[error("not an encrypted private key blob")]
    BadMagic,
    /// The blob was produced by a format version this build does not read
    #[error("unsupported keystore version {0}")]
    UnsupportedVersion(u8),
    /// The blob is too short to carry a keystore header
    #[error("encrypted blob too short, got {0} bytes, expected at least {HEADER_LEN}")]
    TooShort(usize),
    /// The embedded Argon2 parameters were rejected by the KDF
    #[error("invalid key derivation parameters")]
    KdfParams,
    /// Key derivation failed
    #[error("key derivation failed")]
    Kdf,
    /// AEAD sealing failed
    #[error("encryption failed")]
    Encryption,
    /// Authentication failed, either the password is wrong or the blob was
    /// tampered with
    #[error("decryption failed (wrong password?)")]
    Decryption,
    /// The sealed secret does not have the length of a private key
    #[error("decrypted secret has length {0}, expected {SECRET_LEN}")]
    InvalidSecretLength(usize),
    /// The armored form is not valid hex
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
}

/// Argon2id cost parameters recorded in the blob header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Argon2Params {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self { m_cost: 65536, t_cost: 3, p_cost: 4 }
    }
}

/// A private key sealed under a password.
///
/// The wire form is `magic ‖ version ‖ m_cost ‖ t_cost ‖ p_cost ‖ salt ‖
/// nonce ‖ ciphertext‖tag`, all integers little endian. Everything before the
/// ciphertext is authenticated as AEAD associated data, so a blob with an
/// edited header fails to open even with the right password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPrivateKey {
    version: u8,
    kdf_params: Argon2Params,
    salt: [u8; 32],
    nonce: [u8; 24],
    ciphertext_and_tag: Vec<u8>,
}

impl EncryptedPrivateKey {
    /// Seals a private key under `password` with the default KDF costs
    pub fn encrypt(secret: &[u8; SECRET_LEN], password: &str) -> Result<Self, KeystoreError> {
        Self::encrypt_with_params(secret, password, Argon2Params::default())
    }

    /// Seals a private key with explicit Argon2 costs
    pub fn encrypt_with_params(
        secret: &[u8; SECRET_LEN],
        password: &str,
        kdf_params: Argon2Params,
    ) -> Result<Self, KeystoreError> {
        let mut salt = [0u8; 32];
        let mut nonce = [0u8; 24];
        let mut rng = OsRng;
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut nonce);

        let key = Self::derive_key(password, &salt, &kdf_params)?;
        let header = Self {
            version: VERSION,
            kdf_params,
            salt,
            nonce,
            ciphertext_and_tag: Vec::new(),
        }
        .header_bytes();

        let cipher = XChaCha20Poly1305::new(&key.into());
        let ciphertext_and_tag = cipher
            .encrypt(&nonce.into(), Payload { msg: secret.as_slice(), aad: header.as_ref() })
            .map_err(|_| KeystoreError::Encryption)?;

        Ok(Self { version: VERSION, kdf_params, salt, nonce, ciphertext_and_tag })
    }

    /// Opens the blob, returning the private key bytes.
    ///
    /// The plaintext is wrapped in [`Zeroizing`] so it is wiped once the
    /// caller drops it.
    pub fn decrypt(&self, password: &str) -> Result<Zeroizing<[u8; SECRET_LEN]>, KeystoreError> {
        if self.version != VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version))
        }
        let key = Self::derive_key(password, &self.salt, &self.kdf_params)?;
        let header = self.header_bytes();
        let cipher = XChaCha20Poly1305::new(&key.into());
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(
                    &self.nonce.into(),
                    Payload { msg: self.ciphertext_and_tag.as_ref(), aad: header.as_ref() },
                )
                .map_err(|_| KeystoreError::Decryption)?,
        );

        let secret: [u8; SECRET_LEN] = plaintext
            .as_slice()
            .try_into()
            .map_err(|_| KeystoreError::InvalidSecretLength(plaintext.len()))?;
        Ok(Zeroizing::new(secret))
    }

    /// The raw wire form, header followed by ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.header_bytes();
        buf.extend_from_slice(&self.ciphertext_and_tag);
        buf
    }

    /// Parses the raw wire form
    pub fn from_bytes(data: &[u8]) -> Result<Self, KeystoreError> {
        if data.len() < HEADER_LEN {
            return Err(KeystoreError::TooShort(data.len()))
        }
        if data[..4] != MAGIC {
            return Err(KeystoreError::BadMagic)
        }
        let version = data[4];
        if version != VERSION {
            return Err(KeystoreError::UnsupportedVersion(version))
        }
        let kdf_params = Argon2Params {
            m_cost: u32::from_le_bytes(read_array(data, 5)),
            t_cost: u32::from_le_bytes(read_array(data, 9)),
            p_cost: u32::from_le_bytes(read_array(data, 13)),
        };
        let salt = read_array(data, 17);
        let nonce = read_array(data, 49);
        let ciphertext_and_tag = data[HEADER_LEN..].to_vec();
        Ok(Self { version, kdf_params, salt, nonce, ciphertext_and_tag })
    }

    fn header_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.extend_from_slice(&self.kdf_params.m_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf_params.t_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf_params.p_cost.to_le_bytes());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf
    }

    fn derive_key(
        password: &str,
        salt: &[u8; 32],
        params: &Argon2Params,
    ) -> Result<[u8; 32], KeystoreError> {
        let argon2_params = ParamsBuilder::new()
            .m_cost(params.m_cost)
            .t_cost(params.t_cost)
            .p_cost(params.p_cost)
            .build()
            .map_err(|_| KeystoreError::KdfParams)?;
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params);
        let mut key = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|_| KeystoreError::Kdf)?;
        Ok(key)
    }
}

fn read_array<const N: usize>(data: &[u8], at: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&data[at..at + N]);
    buf
}

/// The armored form stored in profiles, the wire bytes as uppercase hex.
impl fmt::Display for EncryptedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.to_bytes()))
    }
}

impl FromStr for EncryptedPrivateKey {
    type Err = KeystoreError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&hex::decode(src)?)
    }
}

impl Serialize for EncryptedPrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EncryptedPrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "test_passphrase_123").unwrap();
        let opened = blob.decrypt("test_passphrase_123").unwrap();
        assert_eq!(*opened, SECRET);
    }

    #[test]
    fn wrong_password_fails() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "correct").unwrap();
        assert!(matches!(blob.decrypt("wrong"), Err(KeystoreError::Decryption)));
    }

    #[test]
    fn wire_roundtrip() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let bytes = blob.to_bytes();
        let parsed = EncryptedPrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, blob);
        assert_eq!(*parsed.decrypt("pass").unwrap(), SECRET);
    }

    #[test]
    fn armored_roundtrip() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let armored = blob.to_string();
        // hex of the magic bytes and format version
        assert!(armored.starts_with("5345504B01"));
        assert_eq!(armored.parse::<EncryptedPrivateKey>().unwrap(), blob);
    }

    #[test]
    fn serializes_as_armored_string() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let json = serde_json::to_value(&blob).unwrap();
        assert_eq!(json, serde_json::Value::String(blob.to_string()));
        let back: EncryptedPrivateKey = serde_json::from_value(json).unwrap();
        assert_eq!(back, blob);
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let mut bytes = blob.to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = EncryptedPrivateKey::from_bytes(&bytes).unwrap();
        assert!(matches!(tampered.decrypt("pass"), Err(KeystoreError::Decryption)));
    }

    #[test]
    fn tampered_header_fails() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let mut bytes = blob.to_bytes();
        // raise the advertised t_cost without re-sealing
        bytes[9] = bytes[9].wrapping_add(1);
        let tampered = EncryptedPrivateKey::from_bytes(&bytes).unwrap();
        assert!(matches!(tampered.decrypt("pass"), Err(KeystoreError::Decryption)));
    }

    #[test]
    fn short_blob_rejected() {
        assert!(matches!(
            EncryptedPrivateKey::from_bytes(&[0u8; 16]),
            Err(KeystoreError::TooShort(16))
        ));
    }

    #[test]
    fn bad_magic_rejected() {
        let blob = EncryptedPrivateKey::encrypt(&SECRET, "pass").unwrap();
        let mut bytes = blob.to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            EncryptedPrivateKey::from_bytes(&bytes),
            Err(KeystoreError::BadMagic)
        ));
    }
}
