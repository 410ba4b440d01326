//! The transaction model and its wire serialization.
//!
//! Every top-level transaction shares a common header:
//!
//! ```text
//! size (u32) ‖ signature (64) ‖ signer public key (32) ‖
//! version (u8) ‖ network (u8) ‖ type (u16) ‖ max fee (u64) ‖ deadline (u64) ‖ body
//! ```
//!
//! All integers are little-endian. The signed portion starts at the version
//! field and is prefixed with the network's generation hash, which binds a
//! signature to exactly one network. Aggregate cosignatures are appended
//! after the body and are not covered by the initiator's signature or the
//! transaction hash.

mod aggregate;
pub use aggregate::{AggregateTransaction, Cosignature, EmbeddedTransaction};

mod hash_lock;
pub use hash_lock::HashLockTransaction;

mod restriction;
pub use restriction::{MosaicAddressRestrictionTransaction, NO_PREVIOUS_RESTRICTION_VALUE};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{
    types::{Deadline, Hash256, NetworkType, PublicKey, Signature},
    utils::sha3_256,
};

/// Serialized length of the common transaction header.
pub(crate) const HEADER_LEN: usize = 4 + Signature::LEN + PublicKey::LEN + 1 + 1 + 2 + 8 + 8;
/// Offset of the version field, where the signed portion starts.
pub(crate) const SIGNING_OFFSET: usize = 4 + Signature::LEN + PublicKey::LEN;

/// Version carried by all transaction types this crate models.
pub(crate) const TRANSACTION_VERSION: u8 = 1;

/// An error building or embedding a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Aggregates cannot contain other aggregates
    #[error("an aggregate transaction cannot embed another aggregate")]
    NestedAggregate,
}

/// The entity type carried on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionType {
    MosaicAddressRestriction,
    HashLock,
    AggregateComplete,
    AggregateBonded,
}

impl TransactionType {
    pub const fn wire_id(&self) -> u16 {
        match self {
            TransactionType::MosaicAddressRestriction => 0x4251,
            TransactionType::HashLock => 0x4148,
            TransactionType::AggregateComplete => 0x4141,
            TransactionType::AggregateBonded => 0x4241,
        }
    }

    /// Whether payloads of this type are announced to the partial-transaction
    /// endpoint instead of the main one.
    pub const fn is_announced_as_partial(&self) -> bool {
        matches!(self, TransactionType::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::MosaicAddressRestriction => "MOSAIC_ADDRESS_RESTRICTION",
            TransactionType::HashLock => "HASH_LOCK",
            TransactionType::AggregateComplete => "AGGREGATE_COMPLETE",
            TransactionType::AggregateBonded => "AGGREGATE_BONDED",
        };
        f.write_str(name)
    }
}

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    MosaicAddressRestriction(MosaicAddressRestrictionTransaction),
    HashLock(HashLockTransaction),
    AggregateComplete(AggregateTransaction),
    AggregateBonded(AggregateTransaction),
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            Transaction::HashLock(_) => TransactionType::HashLock,
            Transaction::AggregateComplete(_) => TransactionType::AggregateComplete,
            Transaction::AggregateBonded(_) => TransactionType::AggregateBonded,
        }
    }

    pub fn network_type(&self) -> NetworkType {
        match self {
            Transaction::MosaicAddressRestriction(tx) => tx.network_type,
            Transaction::HashLock(tx) => tx.network_type,
            Transaction::AggregateComplete(tx) | Transaction::AggregateBonded(tx) => {
                tx.network_type
            }
        }
    }

    pub fn deadline(&self) -> Deadline {
        match self {
            Transaction::MosaicAddressRestriction(tx) => tx.deadline,
            Transaction::HashLock(tx) => tx.deadline,
            Transaction::AggregateComplete(tx) | Transaction::AggregateBonded(tx) => tx.deadline,
        }
    }

    pub fn max_fee(&self) -> u64 {
        match self {
            Transaction::MosaicAddressRestriction(tx) => tx.max_fee,
            Transaction::HashLock(tx) => tx.max_fee,
            Transaction::AggregateComplete(tx) | Transaction::AggregateBonded(tx) => tx.max_fee,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Transaction::AggregateComplete(_) | Transaction::AggregateBonded(_))
    }

    /// The full wire body, cosignatures included.
    pub fn serialize_body(&self) -> Vec<u8> {
        match self {
            Transaction::MosaicAddressRestriction(tx) => tx.serialize_body(),
            Transaction::HashLock(tx) => tx.serialize_body(),
            Transaction::AggregateComplete(tx) | Transaction::AggregateBonded(tx) => {
                tx.serialize_body()
            }
        }
    }

    /// The portion of the body covered by the initiator's signature and the
    /// transaction hash. For aggregates this stops before the cosignatures,
    /// so cosigning does not invalidate the initiator's signature.
    fn signable_body(&self) -> Vec<u8> {
        match self {
            Transaction::AggregateComplete(tx) | Transaction::AggregateBonded(tx) => {
                tx.serialize_signable_body()
            }
            other => other.serialize_body(),
        }
    }

    fn write_unsigned_header(&self, buf: &mut Vec<u8>) {
        buf.push(TRANSACTION_VERSION);
        buf.push(self.network_type().wire_id());
        buf.extend_from_slice(&self.transaction_type().wire_id().to_le_bytes());
        buf.extend_from_slice(&self.max_fee().to_le_bytes());
        buf.extend_from_slice(&self.deadline().value().to_le_bytes());
    }

    /// The exact bytes an account signs: the generation hash followed by the
    /// header (from the version field) and the signable body.
    pub fn signing_bytes(&self, generation_hash: &Hash256) -> Vec<u8> {
        let body = self.signable_body();
        let mut buf = Vec::with_capacity(32 + HEADER_LEN - SIGNING_OFFSET + body.len());
        buf.extend_from_slice(generation_hash.as_bytes());
        self.write_unsigned_header(&mut buf);
        buf.extend_from_slice(&body);
        buf
    }

    /// Assembles the announceable payload for a produced signature.
    pub fn serialize_signed(&self, signer: &PublicKey, signature: &Signature) -> Vec<u8> {
        let body = self.serialize_body();
        let size = HEADER_LEN + body.len();
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(&(size as u32).to_le_bytes());
        buf.extend_from_slice(signature.as_bytes());
        buf.extend_from_slice(signer.as_bytes());
        self.write_unsigned_header(&mut buf);
        buf.extend_from_slice(&body);
        buf
    }

    /// The transaction hash announced payloads are referenced by:
    /// `sha3_256(signature ‖ signer ‖ generation hash ‖ signed portion)`.
    pub fn hash(
        &self,
        signer: &PublicKey,
        signature: &Signature,
        generation_hash: &Hash256,
    ) -> Hash256 {
        let body = self.signable_body();
        let mut buf = Vec::with_capacity(
            Signature::LEN + PublicKey::LEN + 32 + HEADER_LEN - SIGNING_OFFSET + body.len(),
        );
        buf.extend_from_slice(signature.as_bytes());
        buf.extend_from_slice(signer.as_bytes());
        buf.extend_from_slice(generation_hash.as_bytes());
        self.write_unsigned_header(&mut buf);
        buf.extend_from_slice(&body);
        Hash256::new(sha3_256(&buf))
    }

    /// Converts this transaction into the compact form aggregates embed.
    /// Fails for aggregates, which cannot nest.
    pub fn to_embedded(&self, signer: &PublicKey) -> Result<EmbeddedTransaction, TransactionError> {
        if self.is_aggregate() {
            return Err(TransactionError::NestedAggregate)
        }
        Ok(EmbeddedTransaction {
            signer_public_key: *signer,
            version: TRANSACTION_VERSION,
            network_type: self.network_type(),
            transaction_type: self.transaction_type(),
            body: self.serialize_body(),
        })
    }
}

impl From<MosaicAddressRestrictionTransaction> for Transaction {
    fn from(tx: MosaicAddressRestrictionTransaction) -> Self {
        Transaction::MosaicAddressRestriction(tx)
    }
}

impl From<HashLockTransaction> for Transaction {
    fn from(tx: HashLockTransaction) -> Self {
        Transaction::HashLock(tx)
    }
}

/// A signed, network-ready transaction payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The full serialized payload, announced as hex
    #[serde(with = "hex_payload")]
    pub payload: Vec<u8>,
    /// The transaction hash the network tracks the payload by
    pub hash: Hash256,
    /// The initiating signer
    pub signer_public_key: PublicKey,
    /// The payload's entity type
    pub transaction_type: TransactionType,
    /// The network the payload is valid for
    pub network_type: NetworkType,
}

impl SignedTransaction {
    /// The payload as uppercase hex, the encoding the REST gateway expects.
    pub fn payload_hex(&self) -> String {
        hex::encode_upper(&self.payload)
    }
}

mod hex_payload {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(payload))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for TransactionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.wire_id())
    }
}

impl<'de> serde::Deserialize<'de> for TransactionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u16::deserialize(deserializer)?;
        match id {
            0x4251 => Ok(TransactionType::MosaicAddressRestriction),
            0x4148 => Ok(TransactionType::HashLock),
            0x4141 => Ok(TransactionType::AggregateComplete),
            0x4241 => Ok(TransactionType::AggregateBonded),
            other => Err(serde::de::Error::custom(format!("unknown transaction type: {other:#06x}"))),
        }
    }
}
