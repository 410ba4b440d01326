use crate::types::{Address, Deadline, MosaicId, NetworkType};

/// Marker for a restriction entry with no prior value.
///
/// The network distinguishes "create" from "update" by the previous value
/// carried in the transaction; this sentinel means no entry existed.
pub const NO_PREVIOUS_RESTRICTION_VALUE: u64 = u64::MAX;

/// Sets a per-address value for a mosaic restriction key.
///
/// The owning account of a restrictable mosaic uses these to grant or revoke
/// an individual address's standing against the mosaic's global restriction
/// rules. The `previous_restriction_value` must match the network's current
/// entry (or the sentinel when none exists) for the transaction to validate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicAddressRestrictionTransaction {
    pub network_type: NetworkType,
    pub deadline: Deadline,
    pub max_fee: u64,
    pub mosaic_id: MosaicId,
    pub restriction_key: u64,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
    pub target_address: Address,
}

impl MosaicAddressRestrictionTransaction {
    /// Creates a restriction update with no prior value and a zero fee.
    pub fn new(
        network_type: NetworkType,
        deadline: Deadline,
        mosaic_id: MosaicId,
        restriction_key: u64,
        target_address: Address,
        new_restriction_value: u64,
    ) -> Self {
        Self {
            network_type,
            deadline,
            max_fee: 0,
            mosaic_id,
            restriction_key,
            previous_restriction_value: NO_PREVIOUS_RESTRICTION_VALUE,
            new_restriction_value,
            target_address,
        }
    }

    /// Sets the maximum fee the signer authorizes.
    #[must_use]
    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Sets the current on-network value this update supersedes.
    #[must_use]
    pub fn previous_restriction_value(mut self, value: u64) -> Self {
        self.previous_restriction_value = value;
        self
    }

    pub(crate) fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + 8 + 8 + 8 + Address::LEN);
        buf.extend_from_slice(&self.mosaic_id.as_u64().to_le_bytes());
        buf.extend_from_slice(&self.restriction_key.to_le_bytes());
        buf.extend_from_slice(&self.previous_restriction_value.to_le_bytes());
        buf.extend_from_slice(&self.new_restriction_value.to_le_bytes());
        buf.extend_from_slice(self.target_address.as_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PublicKey;

    fn target() -> Address {
        let key: PublicKey =
            "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap();
        Address::from_public_key(&key, NetworkType::TestNet)
    }

    #[test]
    fn body_layout() {
        let tx = MosaicAddressRestrictionTransaction::new(
            NetworkType::TestNet,
            Deadline::from(1u64),
            MosaicId::new(0x0DC67FBE1CAD29E3),
            7,
            target(),
            100,
        )
        .previous_restriction_value(42);

        let body = tx.serialize_body();
        assert_eq!(body.len(), 56);
        assert_eq!(u64::from_le_bytes(body[0..8].try_into().unwrap()), 0x0DC67FBE1CAD29E3);
        assert_eq!(u64::from_le_bytes(body[8..16].try_into().unwrap()), 7);
        assert_eq!(u64::from_le_bytes(body[16..24].try_into().unwrap()), 42);
        assert_eq!(u64::from_le_bytes(body[24..32].try_into().unwrap()), 100);
        assert_eq!(&body[32..], target().as_bytes());
    }

    #[test]
    fn defaults_to_no_previous_value() {
        let tx = MosaicAddressRestrictionTransaction::new(
            NetworkType::TestNet,
            Deadline::from(1u64),
            MosaicId::new(1),
            1,
            target(),
            1,
        );
        assert_eq!(tx.previous_restriction_value, NO_PREVIOUS_RESTRICTION_VALUE);
        assert_eq!(tx.max_fee, 0);
    }
}
