use crate::{
    types::{Deadline, Hash256, NetworkType, PublicKey, Signature, TransactionType},
    utils::{merkle_root, sha3_256},
};

/// Serialized length of an embedded transaction's header.
const EMBEDDED_HEADER_LEN: usize = 4 + PublicKey::LEN + 1 + 1 + 2;

/// Wire version of a cosignature record.
const COSIGNATURE_VERSION: u64 = 0;

/// The compact form of a transaction inside an aggregate.
///
/// Embedded transactions carry no fee, deadline or signature of their own:
/// the enclosing aggregate's header and cosignatures authorize them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedTransaction {
    pub signer_public_key: PublicKey,
    pub version: u8,
    pub network_type: NetworkType,
    pub transaction_type: TransactionType,
    pub body: Vec<u8>,
}

impl EmbeddedTransaction {
    pub fn serialize(&self) -> Vec<u8> {
        let size = EMBEDDED_HEADER_LEN + self.body.len();
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(&(size as u32).to_le_bytes());
        buf.extend_from_slice(self.signer_public_key.as_bytes());
        buf.push(self.version);
        buf.push(self.network_type.wire_id());
        buf.extend_from_slice(&self.transaction_type.wire_id().to_le_bytes());
        buf.extend_from_slice(&self.body);
        buf
    }

    pub fn hash(&self) -> Hash256 {
        Hash256::new(sha3_256(self.serialize()))
    }
}

/// A cosignatory's signature over an aggregate's transaction hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cosignature {
    pub signer_public_key: PublicKey,
    pub signature: Signature,
}

impl Cosignature {
    /// Serialized length of a cosignature record.
    pub const LEN: usize = 8 + PublicKey::LEN + Signature::LEN;

    pub(crate) fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::LEN);
        buf.extend_from_slice(&COSIGNATURE_VERSION.to_le_bytes());
        buf.extend_from_slice(self.signer_public_key.as_bytes());
        buf.extend_from_slice(self.signature.as_bytes());
        buf
    }
}

/// A set of embedded transactions executed as one unit.
///
/// The body commits to the embedded transactions with the Merkle root of
/// their hashes; cosignatures are appended after the payload and may grow
/// without invalidating the initiator's signature. Whether the aggregate is
/// announced complete or bonded is decided by the enclosing
/// [`Transaction`](crate::types::Transaction) variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateTransaction {
    pub network_type: NetworkType,
    pub deadline: Deadline,
    pub max_fee: u64,
    pub inner: Vec<EmbeddedTransaction>,
    pub cosignatures: Vec<Cosignature>,
}

impl AggregateTransaction {
    pub fn new(
        network_type: NetworkType,
        deadline: Deadline,
        inner: Vec<EmbeddedTransaction>,
    ) -> Self {
        Self { network_type, deadline, max_fee: 0, inner, cosignatures: Vec::new() }
    }

    /// Sets the maximum fee the signer authorizes.
    #[must_use]
    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Appends collected cosignatures.
    #[must_use]
    pub fn cosignatures(mut self, cosignatures: Vec<Cosignature>) -> Self {
        self.cosignatures = cosignatures;
        self
    }

    /// The Merkle root over the embedded transactions' hashes.
    pub fn transactions_hash(&self) -> Hash256 {
        let hashes: Vec<[u8; 32]> = self.inner.iter().map(|tx| *tx.hash().as_bytes()).collect();
        Hash256::new(merkle_root(&hashes))
    }

    /// The signed portion of the body: transactions hash, payload size and
    /// the embedded payloads. Cosignatures are excluded.
    pub(crate) fn serialize_signable_body(&self) -> Vec<u8> {
        let payload: Vec<u8> = self.inner.iter().flat_map(|tx| tx.serialize()).collect();
        let mut buf = Vec::with_capacity(32 + 4 + payload.len());
        buf.extend_from_slice(self.transactions_hash().as_bytes());
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&payload);
        buf
    }

    pub(crate) fn serialize_body(&self) -> Vec<u8> {
        let mut buf = self.serialize_signable_body();
        for cosignature in &self.cosignatures {
            buf.extend_from_slice(&cosignature.serialize());
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Address, MosaicAddressRestrictionTransaction, MosaicId, Transaction,
    };

    fn signer() -> PublicKey {
        "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap()
    }

    fn embedded() -> EmbeddedTransaction {
        let target = Address::from_public_key(&signer(), NetworkType::TestNet);
        let tx = Transaction::from(MosaicAddressRestrictionTransaction::new(
            NetworkType::TestNet,
            Deadline::from(1u64),
            MosaicId::new(0x0DC67FBE1CAD29E3),
            1,
            target,
            100,
        ));
        tx.to_embedded(&signer()).unwrap()
    }

    #[test]
    fn embedded_size_field_matches() {
        let bytes = embedded().serialize();
        let declared = u32::from_le_bytes(bytes[..4].try_into().unwrap());
        assert_eq!(declared as usize, bytes.len());
        assert_eq!(bytes.len(), EMBEDDED_HEADER_LEN + 56);
    }

    #[test]
    fn single_inner_root_is_its_hash() {
        let inner = embedded();
        let aggregate =
            AggregateTransaction::new(NetworkType::TestNet, Deadline::from(1u64), vec![inner.clone()]);
        assert_eq!(aggregate.transactions_hash(), inner.hash());
    }

    #[test]
    fn cosignatures_extend_body_but_not_signable_portion() {
        let aggregate =
            AggregateTransaction::new(NetworkType::TestNet, Deadline::from(1u64), vec![embedded()]);
        let signable = aggregate.serialize_signable_body();

        let cosigned = aggregate.clone().cosignatures(vec![Cosignature {
            signer_public_key: signer(),
            signature: Signature::new([9u8; 64]),
        }]);
        assert_eq!(cosigned.serialize_signable_body(), signable);
        assert_eq!(cosigned.serialize_body().len(), signable.len() + Cosignature::LEN);
    }

    #[test]
    fn payload_size_counts_embedded_bytes() {
        let first = embedded();
        let second = embedded();
        let expected = first.serialize().len() + second.serialize().len();
        let aggregate = AggregateTransaction::new(
            NetworkType::TestNet,
            Deadline::from(1u64),
            vec![first, second],
        );
        let body = aggregate.serialize_signable_body();
        let declared = u32::from_le_bytes(body[32..36].try_into().unwrap());
        assert_eq!(declared as usize, expected);
        assert_eq!(body.len(), 36 + expected);
    }
}
