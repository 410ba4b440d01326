//! Envelope selection and the batch signing pipeline.
//!
//! An ordinary account signs and announces its transactions as-is. An account
//! under multisig control cannot announce on its own: its transactions are
//! embedded into an aggregate. When the initiator alone meets the approval
//! threshold the aggregate is complete, otherwise it is announced as a bonded
//! partial that waits for cosignatures on the network, funded by a hash lock
//! that must confirm first.

use crate::Account;
use symbol_core::types::{
    AggregateTransaction, Deadline, GenerationHash, HashLockTransaction, Mosaic, MosaicId,
    MultisigAccountInfo, SignedTransaction, Transaction, TransactionError,
};
use thiserror::Error;
use tracing::debug;

/// Network currency locked alongside a bonded aggregate, in absolute units.
pub const LOCK_AMOUNT: u64 = 10_000_000;
/// Number of blocks a hash lock stays in effect.
pub const LOCK_DURATION_BLOCKS: u64 = 480;

/// Error thrown while packaging a batch for signing
#[derive(Debug, Error)]
pub enum SigningError {
    /// The account's multisig settings are contradictory
    #[error("multisig account requires {min_approval} approvals but lists no cosignatories")]
    MultisigConfiguration { min_approval: u32 },
    /// Nothing to sign
    #[error("transaction list is empty")]
    NoTransactions,
    /// A transaction could not be embedded into an aggregate
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// How a batch of transactions is packaged for announcement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// Ordinary account, every transaction signed as-is
    SingleSigner,
    /// Multisig account whose threshold the initiator meets on its own
    AggregateComplete,
    /// Multisig account needing further cosignatures, announced as a
    /// partial behind a hash lock
    AggregateBonded,
}

/// Picks the announcement envelope for a batch.
///
/// The choice is a function of its arguments alone, so for fixed inputs the
/// same envelope is always selected.
pub fn envelope(
    multisig_info: Option<&MultisigAccountInfo>,
    transaction_count: usize,
) -> Result<Envelope, SigningError> {
    if transaction_count == 0 {
        return Err(SigningError::NoTransactions)
    }
    match multisig_info {
        Some(info) if info.is_multisig() => {
            if info.cosignatory_addresses.is_empty() {
                return Err(SigningError::MultisigConfiguration {
                    min_approval: info.min_approval,
                })
            }
            if info.min_approval <= 1 {
                Ok(Envelope::AggregateComplete)
            } else {
                Ok(Envelope::AggregateBonded)
            }
        }
        _ => Ok(Envelope::SingleSigner),
    }
}

/// Everything the signing pipeline needs for one batch.
#[derive(Debug)]
pub struct TransactionSignatureOptions {
    /// The signing account, already decrypted
    pub account: Account,
    /// Unsigned transactions, in announcement order
    pub transactions: Vec<Transaction>,
    /// Max fee applied to the envelopes the pipeline itself constructs
    pub max_fee: u64,
    /// Multisig settings of the signing account, if it has any
    pub signer_multisig_info: Option<MultisigAccountInfo>,
    /// Generation hash of the target network
    pub generation_hash: GenerationHash,
    /// Offset of the network epoch from the Unix epoch, in seconds
    pub epoch_adjustment: u64,
    /// Mosaic id of the network currency, used to fund hash locks
    pub currency_mosaic_id: MosaicId,
}

/// Signs a batch of transactions, wrapping them according to the signing
/// account's multisig settings.
///
/// Payloads come back in the order they must be announced; for a bonded
/// aggregate that means the hash lock first, then the partial itself.
pub fn sign_transactions(
    options: TransactionSignatureOptions,
) -> Result<Vec<SignedTransaction>, SigningError> {
    let TransactionSignatureOptions {
        account,
        transactions,
        max_fee,
        signer_multisig_info,
        generation_hash,
        epoch_adjustment,
        currency_mosaic_id,
    } = options;

    let envelope = envelope(signer_multisig_info.as_ref(), transactions.len())?;
    debug!(?envelope, count = transactions.len(), "selected announcement envelope");

    match envelope {
        Envelope::SingleSigner => Ok(transactions
            .iter()
            .map(|tx| account.sign_transaction_sync(tx, &generation_hash))
            .collect()),
        Envelope::AggregateComplete => {
            let aggregate = wrap_in_aggregate(&account, &transactions, max_fee, epoch_adjustment)?;
            Ok(vec![account.sign_transaction_sync(
                &Transaction::AggregateComplete(aggregate),
                &generation_hash,
            )])
        }
        Envelope::AggregateBonded => {
            let aggregate = wrap_in_aggregate(&account, &transactions, max_fee, epoch_adjustment)?;
            let bonded = account.sign_transaction_sync(
                &Transaction::AggregateBonded(aggregate),
                &generation_hash,
            );

            // the lock must confirm before the network accepts the partial
            let lock = HashLockTransaction::new(
                account.network_type(),
                Deadline::create(epoch_adjustment),
                Mosaic::new(currency_mosaic_id, LOCK_AMOUNT),
                LOCK_DURATION_BLOCKS,
                bonded.hash,
            )
            .max_fee(max_fee);
            let lock = account.sign_transaction_sync(&Transaction::from(lock), &generation_hash);

            Ok(vec![lock, bonded])
        }
    }
}

/// Embeds the batch into a single aggregate attributed to `account`.
fn wrap_in_aggregate(
    account: &Account,
    transactions: &[Transaction],
    max_fee: u64,
    epoch_adjustment: u64,
) -> Result<AggregateTransaction, SigningError> {
    let signer = account.public_key();
    let inner = transactions
        .iter()
        .map(|tx| tx.to_embedded(&signer))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AggregateTransaction::new(
        account.network_type(),
        Deadline::create(epoch_adjustment),
        inner,
    )
    .max_fee(max_fee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use symbol_core::types::{Address, NetworkType, Signature, TransactionType};

    const EPOCH_ADJUSTMENT: u64 = 1_616_694_977;

    fn generation_hash() -> GenerationHash {
        "3A985DA74FE225B2045C172D6BD390BD855F086E3E9D525B46BFE24511431532".parse().unwrap()
    }

    fn currency() -> MosaicId {
        MosaicId::new(0x6BED913FA20223F8)
    }

    fn account() -> Account {
        Account::from_private_key(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            NetworkType::TestNet,
        )
        .unwrap()
    }

    fn restriction(key: u64) -> Transaction {
        let target = Address::from_public_key(&account().public_key(), NetworkType::TestNet);
        symbol_core::types::MosaicAddressRestrictionTransaction::new(
            NetworkType::TestNet,
            Deadline::create(EPOCH_ADJUSTMENT),
            MosaicId::new(0x0DC67FBE1CAD29E3),
            key,
            target,
            1,
        )
        .into()
    }

    fn multisig(min_approval: u32, cosignatories: usize) -> MultisigAccountInfo {
        let cosignatory_addresses = (0..cosignatories)
            .map(|_| {
                Account::new(&mut rand::thread_rng(), NetworkType::TestNet).address()
            })
            .collect();
        MultisigAccountInfo { min_approval, min_removal: min_approval, cosignatory_addresses }
    }

    fn options(
        transactions: Vec<Transaction>,
        info: Option<MultisigAccountInfo>,
    ) -> TransactionSignatureOptions {
        TransactionSignatureOptions {
            account: account(),
            transactions,
            max_fee: 2_000_000,
            signer_multisig_info: info,
            generation_hash: generation_hash(),
            epoch_adjustment: EPOCH_ADJUSTMENT,
            currency_mosaic_id: currency(),
        }
    }

    /// Checks the payload's embedded signature against the signer's key.
    fn assert_payload_verifies(signed: &SignedTransaction) {
        let signature = Signature::new(signed.payload[4..68].try_into().unwrap());
        let mut signing_bytes = generation_hash().as_bytes().to_vec();
        signing_bytes.extend_from_slice(&signed.payload[100..]);
        signed.signer_public_key.verify(&signing_bytes, &signature).unwrap();
    }

    #[test]
    fn envelope_decision_table() {
        assert_eq!(envelope(None, 1).unwrap(), Envelope::SingleSigner);
        assert_eq!(envelope(None, 3).unwrap(), Envelope::SingleSigner);
        // settings present but the account was never converted
        assert_eq!(
            envelope(Some(&MultisigAccountInfo::default()), 1).unwrap(),
            Envelope::SingleSigner
        );
        assert_eq!(envelope(Some(&multisig(1, 2)), 1).unwrap(), Envelope::AggregateComplete);
        assert_eq!(envelope(Some(&multisig(2, 2)), 1).unwrap(), Envelope::AggregateBonded);
        assert_eq!(envelope(Some(&multisig(3, 5)), 4).unwrap(), Envelope::AggregateBonded);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(envelope(None, 0), Err(SigningError::NoTransactions)));
        let err = sign_transactions(options(vec![], None)).unwrap_err();
        assert!(matches!(err, SigningError::NoTransactions));
    }

    #[test]
    fn broken_multisig_settings_are_rejected() {
        let err = envelope(Some(&multisig(2, 0)), 1).unwrap_err();
        assert!(matches!(err, SigningError::MultisigConfiguration { min_approval: 2 }));
    }

    #[test]
    fn ordinary_account_signs_each_transaction() {
        let batch = vec![restriction(1), restriction(2)];
        let signed = sign_transactions(options(batch.clone(), None)).unwrap();

        assert_eq!(signed.len(), 2);
        // input order is preserved and signing is deterministic
        for (tx, signed) in batch.iter().zip(&signed) {
            let expected = account().sign_transaction_sync(tx, &generation_hash());
            assert_eq!(signed, &expected);
            assert_payload_verifies(signed);
        }
    }

    #[test]
    fn multisig_account_gets_aggregate_complete() {
        let signed =
            sign_transactions(options(vec![restriction(1), restriction(2)], Some(multisig(1, 2))))
                .unwrap();

        assert_eq!(signed.len(), 1);
        assert_eq!(signed[0].transaction_type, TransactionType::AggregateComplete);
        assert_payload_verifies(&signed[0]);
    }

    #[test]
    fn bonded_flow_prepends_hash_lock() {
        let signed =
            sign_transactions(options(vec![restriction(1)], Some(multisig(2, 2)))).unwrap();

        assert_eq!(signed.len(), 2);
        let lock = &signed[0];
        let bonded = &signed[1];
        assert_eq!(lock.transaction_type, TransactionType::HashLock);
        assert_eq!(bonded.transaction_type, TransactionType::AggregateBonded);
        assert_payload_verifies(lock);
        assert_payload_verifies(bonded);

        // the lock references the bonded aggregate by hash and carries the
        // protocol lock amount and duration
        assert_eq!(&lock.payload[lock.payload.len() - 32..], bonded.hash.as_bytes());
        let amount = u64::from_le_bytes(lock.payload[128..136].try_into().unwrap());
        assert_eq!(amount, LOCK_AMOUNT);
        let duration = u64::from_le_bytes(lock.payload[136..144].try_into().unwrap());
        assert_eq!(duration, LOCK_DURATION_BLOCKS);
    }

    #[test]
    fn aggregate_inputs_cannot_nest() {
        let embedded =
            restriction(1).to_embedded(&account().public_key()).unwrap();
        let aggregate = Transaction::AggregateComplete(AggregateTransaction::new(
            NetworkType::TestNet,
            Deadline::create(EPOCH_ADJUSTMENT),
            vec![embedded],
        ));
        let err = sign_transactions(options(vec![aggregate], Some(multisig(1, 1)))).unwrap_err();
        assert!(matches!(err, SigningError::Transaction(TransactionError::NestedAggregate)));
    }
}
