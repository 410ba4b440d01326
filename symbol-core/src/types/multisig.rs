use crate::types::Address;
use serde::{Deserialize, Serialize};

/// Multisig settings of an account, as reported by a network node.
///
/// Accounts that have never been converted to multisig have no settings at
/// all; callers model that as `Option<MultisigAccountInfo>` rather than as a
/// value with every field zeroed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountInfo {
    /// Number of cosignatures required to approve a transaction.
    pub min_approval: u32,
    /// Number of cosignatures required to remove a cosignatory.
    pub min_removal: u32,
    /// Addresses of the accounts allowed to cosign.
    pub cosignatory_addresses: Vec<Address>,
}

impl MultisigAccountInfo {
    /// Whether the account is under multisig control.
    ///
    /// A converted account cannot announce on its own once `min_approval`
    /// is at least one.
    pub fn is_multisig(&self) -> bool {
        self.min_approval > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_not_multisig() {
        assert!(!MultisigAccountInfo::default().is_multisig());
    }

    #[test]
    fn converted_account_is_multisig() {
        let info = MultisigAccountInfo {
            min_approval: 1,
            min_removal: 1,
            cosignatory_addresses: Vec::new(),
        };
        assert!(info.is_multisig());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let info = MultisigAccountInfo {
            min_approval: 2,
            min_removal: 1,
            cosignatory_addresses: Vec::new(),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"minApproval\":2"));
        assert!(json.contains("\"cosignatoryAddresses\":[]"));
    }
}
