//! Command line wallet client for Symbol networks.
//!
//! The binary wires four pieces together, each usable on its own from tests:
//!
//! - [`resolvers`]: per-option resolution with flag > profile > prompt
//!   precedence
//! - [`profile`]: the on-disk profile store and the decryption of a stored
//!   key into a signing account
//! - [`commands`]: the clap command tree, orchestrating resolution,
//!   construction, signing and announcement
//! - [`announce`]: ordered submission of signed payloads with
//!   per-transaction outcomes

pub mod announce;
pub mod commands;
pub mod profile;
pub mod resolvers;
