use crate::{Provider, ProviderError, RestClient};
use symbol_core::types::{
    Address, Deadline, MosaicAddressRestrictionTransaction, MosaicId, NetworkType, Transaction,
};
use tracing::debug;

/// Builds mosaic address restriction updates against live network state.
///
/// The network validates the previous value carried by an update, so the
/// current entry for `(mosaic, target, key)` has to be looked up before the
/// transaction is constructed. Absent entries keep the constructor's
/// no-previous-value sentinel.
#[derive(Clone, Debug)]
pub struct RestrictionService<'a, C> {
    provider: &'a Provider<C>,
}

impl<'a, C: RestClient> RestrictionService<'a, C> {
    pub fn new(provider: &'a Provider<C>) -> Self {
        Self { provider }
    }

    /// Constructs a restriction update for `target`, carrying the current
    /// on-network value of the entry it supersedes.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_transaction(
        &self,
        network_type: NetworkType,
        deadline: Deadline,
        max_fee: u64,
        mosaic_id: MosaicId,
        restriction_key: u64,
        target_address: Address,
        new_restriction_value: u64,
    ) -> Result<Transaction, ProviderError> {
        let current = self
            .provider
            .mosaic_address_restriction_value(&mosaic_id, &target_address, restriction_key)
            .await?;
        debug!(%mosaic_id, restriction_key, current, "looked up restriction entry");

        let mut transaction = MosaicAddressRestrictionTransaction::new(
            network_type,
            deadline,
            mosaic_id,
            restriction_key,
            target_address,
            new_restriction_value,
        )
        .max_fee(max_fee);
        if let Some(previous) = current {
            transaction = transaction.previous_restriction_value(previous);
        }
        Ok(transaction.into())
    }
}
