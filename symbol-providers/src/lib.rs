#![deny(rustdoc::broken_intra_doc_links)]
//! # Clients for interacting with Symbol REST gateways
//!
//! This crate provides asynchronous clients for the HTTP gateway every
//! Symbol node exposes.
//!
//! For more documentation on the available calls, refer to the
//! [`Provider`](crate::Provider) struct.
//!
//! # Examples
//!
//! ```no_run
//! use symbol_providers::{Http, Provider};
//! use std::str::FromStr;
//!
//! # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::new(Http::from_str("http://localhost:3000")?);
//!
//! let info = provider.node_info().await?;
//! println!("network: {}", info.network_identifier);
//!
//! let properties = provider.network_properties().await?;
//! println!("currency mosaic: {}", properties.currency_mosaic_id);
//! # Ok(())
//! # }
//! ```
mod rest;
pub use rest::*;

/// Errors
pub mod errors;
pub use errors::{ProviderError, RestError};

mod restriction;
pub use restriction::RestrictionService;
