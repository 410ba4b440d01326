//! Sequential announcement of signed payloads with per-transaction outcomes.

use std::fmt;
use symbol_core::types::{Hash256, SignedTransaction, TransactionType};
use symbol_providers::{Provider, ProviderError, RestClient, RestError};
use thiserror::Error;
use tracing::{debug, warn};

/// The gateway's verdict on one announcement attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The submission endpoint acknowledged receipt; inclusion in a block is
    /// not guaranteed
    Accepted { message: String },
    /// The endpoint rejected the payload with a validation error, reported
    /// verbatim
    Rejected { code: String, message: String },
}

/// One announced transaction and how the gateway answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub hash: Hash256,
    pub transaction_type: TransactionType,
    pub outcome: Outcome,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Accepted { message } => {
                write!(f, "accepted {:?} {} ({message})", self.transaction_type, self.hash)
            }
            Outcome::Rejected { code, message } => {
                write!(f, "rejected {:?} {}: {code} {message}", self.transaction_type, self.hash)
            }
        }
    }
}

/// A transport failure mid-sequence.
///
/// Carries the outcomes gathered before the failure so callers can still
/// report partial progress. The failed transaction is not retried, a signed
/// payload resubmitted blindly risks duplicate acceptance.
#[derive(Debug, Error)]
#[error("announcing transaction {hash} failed: {source}")]
pub struct AnnounceError {
    pub hash: Hash256,
    pub completed: Vec<Announcement>,
    pub source: ProviderError,
}

/// Submits signed payloads to the network, strictly in order.
#[derive(Clone, Debug)]
pub struct Announcer<'a, C> {
    provider: &'a Provider<C>,
}

impl<'a, C: RestClient> Announcer<'a, C> {
    pub fn new(provider: &'a Provider<C>) -> Self {
        Self { provider }
    }

    /// Announces each payload after the previous call has returned.
    ///
    /// A rejection ends the sequence: later payloads may depend on the
    /// rejected one (a bonded aggregate on its hash lock), so they are left
    /// unannounced and the rejection is the report's last entry. A transport
    /// failure surfaces as [`AnnounceError`] with the outcomes so far.
    pub async fn announce_all(
        &self,
        transactions: &[SignedTransaction],
    ) -> Result<Vec<Announcement>, AnnounceError> {
        let mut report = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            match self.provider.announce(transaction).await {
                Ok(response) => {
                    debug!(hash = %transaction.hash, "announcement accepted");
                    report.push(Announcement {
                        hash: transaction.hash,
                        transaction_type: transaction.transaction_type,
                        outcome: Outcome::Accepted { message: response.message },
                    });
                }
                Err(err) => match err.as_error_response() {
                    Some(node) => {
                        warn!(hash = %transaction.hash, code = %node.code, "announcement rejected");
                        report.push(Announcement {
                            hash: transaction.hash,
                            transaction_type: transaction.transaction_type,
                            outcome: Outcome::Rejected {
                                code: node.code.clone(),
                                message: node.message.clone(),
                            },
                        });
                        break
                    }
                    None => {
                        return Err(AnnounceError {
                            hash: transaction.hash,
                            completed: report,
                            source: err,
                        })
                    }
                },
            }
        }
        Ok(report)
    }
}
