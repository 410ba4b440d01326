#![cfg_attr(docsrs, feature(doc_cfg))]
//! # symbol-rs
//!
//! A complete Symbol wallet library in Rust, with a command line client in
//! the `symbol-cli` member crate.
//!
//! # Quickstart
//!
//! A prelude is provided which imports all the important data types and
//! traits for you. Connect to a node by providing the URL of its REST
//! gateway:
//!
//! ```no_run
//! use symbol::prelude::*;
//! use std::str::FromStr;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::new(Http::from_str("http://localhost:3000")?);
//! let info = provider.node_info().await?;
//! println!("network: {:?}", info.network_type()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Signing a transaction
//!
//! Signing goes through [`sign_transactions`](signers::sign_transactions),
//! which wraps the batch according to the account's multisig settings: plain
//! payloads for an ordinary account, an aggregate (complete or bonded behind
//! a hash lock) for a multisig one.

/// Symbol data types, cryptography and serialization
pub mod core {
    pub use symbol_core::*;
}

/// Clients for interacting with Symbol REST gateways
pub mod providers {
    pub use symbol_providers::*;
}

/// Accounts, the encrypted keystore and the multisig signing pipeline
pub mod signers {
    pub use symbol_signers::*;
}

/// Easy imports of the most commonly used types and traits
pub mod prelude {
    pub use super::{core::types::*, providers::*, signers::*};
}
