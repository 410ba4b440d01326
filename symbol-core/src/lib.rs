#![cfg_attr(docsrs, feature(doc_cfg))]
//! Symbol data types, cryptography and utilities.
//!
//! This library provides type definitions for the Symbol network's main
//! datatypes (addresses, mosaics, namespaces, transactions) along with the
//! hashing and serialization routines the rest of the workspace builds on.
//!
//! ## Deriving an address
//!
//! Addresses are derived from an ed25519 public key by hashing it with
//! SHA3-256, then RIPEMD-160, prefixing the network byte and appending a
//! 3-byte checksum. The 24 raw bytes are displayed as 39 base32 characters.
//!
//! ```rust
//! use symbol_core::types::{Address, NetworkType, PublicKey};
//!
//! let public_key: PublicKey =
//!     "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap();
//! let address = Address::from_public_key(&public_key, NetworkType::TestNet);
//! assert_eq!(address.network_type().unwrap(), NetworkType::TestNet);
//! ```

pub mod types;

/// Various utilities
pub mod utils;

// re-export rand to avoid potential confusion when there's rand version mismatches
pub use rand;

// re-export ed25519-dalek; signers build on the same curve implementation
pub use ed25519_dalek;
