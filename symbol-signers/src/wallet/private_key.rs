//! Specific helper functions for loading an offline Ed25519 private key
use super::Account;

use crate::keystore::{EncryptedPrivateKey, KeystoreError};
use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::{CryptoRng, Rng};
use symbol_core::types::{Address, NetworkType, PublicKey};
use zeroize::Zeroizing;

use thiserror::Error;

#[derive(Error, Debug)]
/// Error thrown by the Account module
pub enum AccountError {
    /// Underlying keystore error
    #[error(transparent)]
    KeystoreError(#[from] KeystoreError),
    /// Error propagated from the hex crate.
    #[error(transparent)]
    HexError(#[from] hex::FromHexError),
    /// The decoded private key has the wrong length
    #[error("invalid private key length {0}, expected {SECRET_KEY_LENGTH} bytes")]
    InvalidKeyLength(usize),
}

impl Account {
    /// Creates a new random keypair seeded with the provided RNG
    pub fn new<R: Rng + CryptoRng>(rng: &mut R, network_type: NetworkType) -> Self {
        let signing_key = SigningKey::generate(rng);
        Self::from_signing_key(signing_key, network_type)
    }

    /// Creates an account from a raw signing key, deriving its public key
    /// and address for the given network
    pub fn from_signing_key(signing_key: SigningKey, network_type: NetworkType) -> Self {
        let public_key = PublicKey::new(signing_key.verifying_key().to_bytes());
        let address = Address::from_public_key(&public_key, network_type);
        Self { signing_key, public_key, address, network_type }
    }

    /// Creates an account from a hex encoded private key
    pub fn from_private_key(private_key: &str, network_type: NetworkType) -> Result<Self, AccountError> {
        let raw = Zeroizing::new(hex::decode(private_key)?);
        let secret: [u8; SECRET_KEY_LENGTH] = raw
            .as_slice()
            .try_into()
            .map_err(|_| AccountError::InvalidKeyLength(raw.len()))?;
        let secret = Zeroizing::new(secret);
        Ok(Self::from_signing_key(SigningKey::from_bytes(&secret), network_type))
    }

    /// Encrypts the account's private key under the provided password.
    ///
    /// The returned blob is self describing and safe to persist; decrypting
    /// it with [`Account::from_encrypted`] restores the account.
    pub fn encrypt<S: AsRef<str>>(&self, password: S) -> Result<EncryptedPrivateKey, AccountError> {
        let secret = Zeroizing::new(self.signing_key.to_bytes());
        Ok(EncryptedPrivateKey::encrypt(&secret, password.as_ref())?)
    }

    /// Decrypts an encrypted private key blob to construct an Account instance
    pub fn from_encrypted<S: AsRef<str>>(
        encrypted: &EncryptedPrivateKey,
        password: S,
        network_type: NetworkType,
    ) -> Result<Self, AccountError> {
        let secret = encrypted.decrypt(password.as_ref())?;
        Ok(Self::from_signing_key(SigningKey::from_bytes(&secret), network_type))
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key.to_bytes().eq(&other.signing_key.to_bytes()) &&
            self.address == other.address &&
            self.network_type == other.network_type
    }
}

impl From<SigningKey> for Account {
    fn from(signing_key: SigningKey) -> Self {
        Self::from_signing_key(signing_key, NetworkType::TestNet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signer;

    #[tokio::test]
    async fn encrypted_private_key_roundtrip() {
        let account = Account::new(&mut rand::thread_rng(), NetworkType::TestNet);
        let encrypted = account.encrypt("correct horse battery staple").unwrap();

        // persist and reload the armored form, as a profile store would
        let armored = encrypted.to_string();
        let reloaded: EncryptedPrivateKey = armored.parse().unwrap();

        let recovered =
            Account::from_encrypted(&reloaded, "correct horse battery staple", NetworkType::TestNet)
                .unwrap();
        assert_eq!(account, recovered);

        // both keys must produce the same signature
        let message = "Some data";
        let signature = account.sign_message(message).await.unwrap();
        let signature2 = recovered.sign_message(message).await.unwrap();
        assert_eq!(signature, signature2);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let account = Account::new(&mut rand::thread_rng(), NetworkType::TestNet);
        let encrypted = account.encrypt("password").unwrap();

        let err = Account::from_encrypted(&encrypted, "not the password", NetworkType::TestNet)
            .unwrap_err();
        assert!(matches!(err, AccountError::KeystoreError(KeystoreError::Decryption)));
    }

    #[tokio::test]
    async fn signs_msg() {
        let message = "Some data";
        let account = Account::new(&mut rand::thread_rng(), NetworkType::MainNet);

        let signature = account.sign_message(message).await.unwrap();

        // verifies the signature is produced by the account's key
        account.public_key().verify(message.as_bytes(), &signature).unwrap();
        assert!(account.public_key().verify(b"Other data", &signature).is_err());
    }

    #[test]
    fn key_to_public_key() {
        // RFC 8032 test vector 1
        let account = Account::from_private_key(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            NetworkType::TestNet,
        )
        .unwrap();
        assert_eq!(
            account.public_key().to_string(),
            "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A"
        );
        assert_eq!(account.address().network_type().unwrap(), NetworkType::TestNet);
    }

    #[test]
    fn rejects_short_keys() {
        let err = Account::from_private_key("9d61b19d", NetworkType::TestNet).unwrap_err();
        assert!(matches!(err, AccountError::InvalidKeyLength(4)));
    }

    #[test]
    fn account_debug_omits_private_key() {
        let account = Account::from_private_key(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            NetworkType::TestNet,
        )
        .unwrap();
        let rendered = format!("{account:?}");
        assert!(rendered.contains(&account.address().to_string()));
        assert!(!rendered.to_lowercase().contains("9d61b19d"));
    }
}
