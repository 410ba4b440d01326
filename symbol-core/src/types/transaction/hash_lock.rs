use crate::types::{Deadline, Hash256, Mosaic, NetworkType};

/// Locks a deposit against the hash of an aggregate bonded transaction.
///
/// The network holds partial (bonded) transactions while cosignatures are
/// collected, and requires a prior lock referencing the bonded payload's hash
/// to make spam expensive. The deposit is returned when the bonded
/// transaction confirms, or burned if the lock expires first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashLockTransaction {
    pub network_type: NetworkType,
    pub deadline: Deadline,
    pub max_fee: u64,
    /// The locked deposit, denominated in the network currency
    pub mosaic: Mosaic,
    /// Lock lifetime in blocks
    pub duration: u64,
    /// Hash of the bonded aggregate this lock vouches for
    pub hash: Hash256,
}

impl HashLockTransaction {
    pub fn new(
        network_type: NetworkType,
        deadline: Deadline,
        mosaic: Mosaic,
        duration: u64,
        hash: Hash256,
    ) -> Self {
        Self { network_type, deadline, max_fee: 0, mosaic, duration, hash }
    }

    /// Sets the maximum fee the signer authorizes.
    #[must_use]
    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub(crate) fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 8 + 8 + 32);
        buf.extend_from_slice(&self.mosaic.id.as_u64().to_le_bytes());
        buf.extend_from_slice(&self.mosaic.amount.to_le_bytes());
        buf.extend_from_slice(&self.duration.to_le_bytes());
        buf.extend_from_slice(self.hash.as_bytes());
        buf
    }
}
