use crate::{MockClient, NodeError, ProviderError, RestClient, RestError};
use serde::{Deserialize, Serialize};
use symbol_core::types::{
    Address, Hash256, MosaicId, MultisigAccountInfo, NamespaceId, NetworkType, ParseNetworkError,
    SignedTransaction,
};
use tracing::debug;

/// Alias types a namespace can carry.
const ALIAS_MOSAIC: u8 = 1;
const ALIAS_ADDRESS: u8 = 2;

/// A client for a Symbol REST gateway.
///
/// Wraps a [`RestClient`] transport and exposes the node, account and
/// transaction operations the wallet needs.
///
/// # Example
///
/// ```no_run
/// use symbol_providers::{Http, Provider};
/// use std::str::FromStr;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::new(Http::from_str("http://localhost:3000")?);
/// let info = provider.node_info().await?;
/// println!("network: {:?}", info.network_type()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Provider<C> {
    client: C,
}

/// Identity and network parameters reported by a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Wire identifier of the network the node serves
    pub network_identifier: u8,
    /// The generation hash seed mixed into every signature on this network
    pub network_generation_hash_seed: Hash256,
}

impl NodeInfo {
    /// The network the node serves.
    pub fn network_type(&self) -> Result<NetworkType, ParseNetworkError> {
        NetworkType::try_from(self.network_identifier)
    }
}

/// Subset of the `network/properties` document the wallet needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkProperties {
    /// Offset of the network epoch from the Unix epoch, in seconds
    pub epoch_adjustment: u64,
    /// Mosaic id of the network currency
    pub currency_mosaic_id: MosaicId,
}

/// Acknowledgement returned by the gateway for an accepted announcement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnounceResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct NetworkPropertiesDto {
    network: NetworkSectionDto,
    chain: ChainSectionDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkSectionDto {
    epoch_adjustment: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainSectionDto {
    currency_mosaic_id: String,
}

#[derive(Debug, Deserialize)]
struct MultisigInfoDto {
    multisig: MultisigAccountInfo,
}

#[derive(Debug, Deserialize)]
struct NamespaceInfoDto {
    namespace: NamespaceDto,
}

#[derive(Debug, Deserialize)]
struct NamespaceDto {
    alias: AliasDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AliasDto {
    #[serde(rename = "type")]
    alias_type: u8,
    #[serde(default)]
    mosaic_id: Option<MosaicId>,
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct RestrictionsDto {
    restrictions: Vec<RestrictionEntryDto>,
}

#[derive(Debug, Deserialize)]
struct RestrictionEntryDto {
    key: u64,
    value: u64,
}

#[derive(Debug, Serialize)]
struct TransactionPayload {
    payload: String,
}

impl<C: RestClient> Provider<C> {
    /// Instantiates the provider with the given transport
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches the node's identity and network parameters
    pub async fn node_info(&self) -> Result<NodeInfo, ProviderError> {
        self.client.get("node/info").await.map_err(Into::into)
    }

    /// Fetches the network's configuration properties.
    ///
    /// The gateway decorates values for readability (`1616694977s`,
    /// `0x6BED'913F'A202'23F8`); the decorations are stripped here.
    pub async fn network_properties(&self) -> Result<NetworkProperties, ProviderError> {
        let dto: NetworkPropertiesDto =
            self.client.get("network/properties").await.map_err(Into::into)?;
        Ok(NetworkProperties {
            epoch_adjustment: parse_epoch_adjustment(&dto.network.epoch_adjustment)?,
            currency_mosaic_id: parse_decorated_mosaic_id(&dto.chain.currency_mosaic_id)?,
        })
    }

    /// Fetches the multisig settings of `address`.
    ///
    /// Accounts that were never converted to multisig have no settings at
    /// all; the gateway reports those as missing and this resolves to
    /// `Ok(None)`.
    pub async fn multisig_info(
        &self,
        address: &Address,
    ) -> Result<Option<MultisigAccountInfo>, ProviderError> {
        let path = format!("account/{address}/multisig");
        match self.client.get::<MultisigInfoDto>(&path).await {
            Ok(dto) => Ok(Some(dto.multisig)),
            Err(err) => {
                let err: ProviderError = err.into();
                if err.as_error_response().map(NodeError::is_not_found).unwrap_or(false) {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Resolves a namespace to the address it aliases
    pub async fn resolve_address_alias(
        &self,
        namespace: &NamespaceId,
    ) -> Result<Address, ProviderError> {
        let alias = self.namespace_alias(namespace).await?;
        match (alias.alias_type, alias.address) {
            (ALIAS_ADDRESS, Some(address)) => Ok(address),
            _ => Err(ProviderError::AliasNotFound(namespace.to_string())),
        }
    }

    /// Resolves a namespace to the mosaic id it aliases
    pub async fn resolve_mosaic_alias(
        &self,
        namespace: &NamespaceId,
    ) -> Result<MosaicId, ProviderError> {
        let alias = self.namespace_alias(namespace).await?;
        match (alias.alias_type, alias.mosaic_id) {
            (ALIAS_MOSAIC, Some(id)) => Ok(id),
            _ => Err(ProviderError::AliasNotFound(namespace.to_string())),
        }
    }

    async fn namespace_alias(&self, namespace: &NamespaceId) -> Result<AliasDto, ProviderError> {
        let path = format!("namespaces/{namespace}");
        match self.client.get::<NamespaceInfoDto>(&path).await {
            Ok(dto) => Ok(dto.namespace.alias),
            Err(err) => {
                let err: ProviderError = err.into();
                if err.as_error_response().map(NodeError::is_not_found).unwrap_or(false) {
                    Err(ProviderError::AliasNotFound(namespace.to_string()))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Looks up the current value of a mosaic address restriction.
    ///
    /// Resolves to `None` when no restriction entry exists for the key, in
    /// which case the chain treats the value as unset.
    pub async fn mosaic_address_restriction_value(
        &self,
        mosaic_id: &MosaicId,
        target: &Address,
        restriction_key: u64,
    ) -> Result<Option<u64>, ProviderError> {
        let path = format!("restrictions/mosaic/{mosaic_id}/address/{target}");
        match self.client.get::<RestrictionsDto>(&path).await {
            Ok(dto) => Ok(dto
                .restrictions
                .iter()
                .find(|entry| entry.key == restriction_key)
                .map(|entry| entry.value)),
            Err(err) => {
                let err: ProviderError = err.into();
                if err.as_error_response().map(NodeError::is_not_found).unwrap_or(false) {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Announces a signed payload to the network.
    ///
    /// Bonded aggregates go to the partial-transaction endpoint, everything
    /// else to the main one.
    pub async fn announce(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<AnnounceResponse, ProviderError> {
        let path = if transaction.transaction_type.is_announced_as_partial() {
            "transactions/partial"
        } else {
            "transactions"
        };
        debug!(hash = %transaction.hash, endpoint = path, "announcing transaction");
        let body = TransactionPayload { payload: transaction.payload_hex() };
        self.client.put(path, body).await.map_err(Into::into)
    }
}

impl<C> AsRef<C> for Provider<C> {
    fn as_ref(&self) -> &C {
        &self.client
    }
}

impl Provider<MockClient> {
    /// Returns a `Provider` instantiated with an internal mock transport,
    /// along with a handle to that transport for seeding responses
    pub fn mocked() -> (Self, MockClient) {
        let mock = MockClient::new();
        let provider = Self::new(mock.clone());
        (provider, mock)
    }
}

fn parse_epoch_adjustment(src: &str) -> Result<u64, ProviderError> {
    src.trim_end_matches('s')
        .parse()
        .map_err(|_| ProviderError::CustomError(format!("invalid epochAdjustment: {src}")))
}

fn parse_decorated_mosaic_id(src: &str) -> Result<MosaicId, ProviderError> {
    let cleaned: String =
        src.trim_start_matches("0x").chars().filter(|c| *c != '\'').collect();
    cleaned
        .parse()
        .map_err(|_| ProviderError::CustomError(format!("invalid currencyMosaicId: {src}")))
}
