mod network;
pub use network::{NetworkType, ParseNetworkError};

mod keys;
pub use keys::{PublicKey, Signature, SignatureError};

mod hash256;
pub use hash256::Hash256;

mod address;
pub use address::{Address, AddressError};

mod mosaic;
pub use mosaic::{Mosaic, MosaicId, ParseIdError};

mod namespace;
pub use namespace::NamespaceId;

mod deadline;
pub use deadline::Deadline;

mod multisig;
pub use multisig::MultisigAccountInfo;

mod transaction;
pub use transaction::{
    AggregateTransaction, Cosignature, EmbeddedTransaction, HashLockTransaction,
    MosaicAddressRestrictionTransaction, SignedTransaction, Transaction, TransactionError,
    TransactionType, NO_PREVIOUS_RESTRICTION_VALUE,
};

/// A network generation hash, mixed into every signing payload
pub type GenerationHash = Hash256;
