mod private_key;
pub use private_key::AccountError;

use crate::Signer;
use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use symbol_core::types::{
    Address, Cosignature, GenerationHash, Hash256, NetworkType, PublicKey, Signature,
    SignedTransaction, Transaction,
};

use async_trait::async_trait;
use std::fmt;

/// A Symbol private-public key pair which can be used for signing transactions.
///
/// # Examples
///
/// ## Signing and verifying a message
///
/// The account produces Ed25519 [`Signature`] objects, which can be then
/// verified against its public key.
///
/// ```
/// use symbol_core::{rand::thread_rng, types::NetworkType};
/// use symbol_signers::{Account, Signer};
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let account = Account::new(&mut thread_rng(), NetworkType::TestNet);
///
/// let message = b"hello";
/// let signature = account.sign_message(message).await?;
/// account.public_key().verify(message, &signature)?;
/// # Ok(())
/// # }
/// ```
///
/// [`Signature`]: symbol_core::types::Signature
#[derive(Clone)]
pub struct Account {
    /// The account's signing key
    pub(crate) signing_key: SigningKey,
    /// The account's public key
    pub(crate) public_key: PublicKey,
    /// The account's address on `network_type`
    pub(crate) address: Address,
    /// The network the account belongs to
    pub(crate) network_type: NetworkType,
}

#[async_trait]
impl Signer for Account {
    type Error = std::convert::Infallible;

    async fn sign_message<S: Send + Sync + AsRef<[u8]>>(
        &self,
        message: S,
    ) -> Result<Signature, Self::Error> {
        Ok(self.sign(message.as_ref()))
    }

    async fn sign_transaction(
        &self,
        transaction: &Transaction,
        generation_hash: &GenerationHash,
    ) -> Result<SignedTransaction, Self::Error> {
        Ok(self.sign_transaction_sync(transaction, generation_hash))
    }

    fn address(&self) -> Address {
        self.address
    }

    fn public_key(&self) -> PublicKey {
        self.public_key
    }
}

impl Account {
    /// Signs arbitrary bytes with the account's private key
    pub fn sign(&self, data: &[u8]) -> Signature {
        let signature = self.signing_key.sign(data);
        Signature::new(signature.to_bytes())
    }

    /// Signs the transaction and assembles the announceable payload.
    ///
    /// The generation hash is mixed into the signed bytes, so a payload is
    /// only valid on the network it was signed for.
    pub fn sign_transaction_sync(
        &self,
        transaction: &Transaction,
        generation_hash: &GenerationHash,
    ) -> SignedTransaction {
        let signing_bytes = transaction.signing_bytes(generation_hash);
        let signature = self.sign(&signing_bytes);
        SignedTransaction {
            payload: transaction.serialize_signed(&self.public_key, &signature),
            hash: transaction.hash(&self.public_key, &signature, generation_hash),
            signer_public_key: self.public_key,
            transaction_type: transaction.transaction_type(),
            network_type: transaction.network_type(),
        }
    }

    /// Cosigns an announced aggregate by signing its transaction hash
    pub fn cosign(&self, hash: &Hash256) -> Cosignature {
        Cosignature {
            signer_public_key: self.public_key,
            signature: self.sign(hash.as_bytes()),
        }
    }

    /// Gets the account's signing key
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Returns the account's address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the account's public key
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Returns the network the account was derived for
    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }
}

// do not log the signing key
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("network_type", &self.network_type)
            .finish()
    }
}
