//! Provides a unified interface for locally signing Symbol transactions.
//!
//! You can implement the `Signer` trait to extend functionality to other signers
//! such as Hardware Security Modules, KMS etc.
//!
//! Supported signers:
//! - Private key ([`Account`])
//!
//! ```
//! # use symbol_signers::{Account, Signer};
//! # use symbol_core::types::NetworkType;
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! // instantiate a fresh account
//! let account = Account::new(&mut symbol_core::rand::thread_rng(), NetworkType::TestNet);
//!
//! // sign a message
//! let signature = account.sign_message("hello world").await?;
//! account.public_key().verify(b"hello world", &signature)?;
//! # Ok(())
//! # }
//! ```

mod wallet;
pub use wallet::{Account, AccountError};

mod keystore;
pub use keystore::{EncryptedPrivateKey, KeystoreError};

mod multisig;
pub use multisig::{
    envelope, sign_transactions, Envelope, SigningError, TransactionSignatureOptions, LOCK_AMOUNT,
    LOCK_DURATION_BLOCKS,
};

use async_trait::async_trait;
use std::error::Error;
use symbol_core::types::{
    Address, GenerationHash, PublicKey, Signature, SignedTransaction, Transaction,
};

/// Trait for signing transactions and messages
///
/// Implement this trait to support different signing modes, e.g. hosted keys, HSMs etc.
#[async_trait]
pub trait Signer: std::fmt::Debug + Send + Sync {
    type Error: Error + Send + Sync;

    /// Signs the provided message bytes
    async fn sign_message<S: Send + Sync + AsRef<[u8]>>(
        &self,
        message: S,
    ) -> Result<Signature, Self::Error>;

    /// Signs the transaction against the given network generation hash and
    /// returns the announceable payload
    async fn sign_transaction(
        &self,
        transaction: &Transaction,
        generation_hash: &GenerationHash,
    ) -> Result<SignedTransaction, Self::Error>;

    /// Returns the signer's Symbol address
    fn address(&self) -> Address;

    /// Returns the signer's public key
    fn public_key(&self) -> PublicKey;
}
