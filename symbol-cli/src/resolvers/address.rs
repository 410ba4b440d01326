use super::{text_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;
use symbol_core::types::{Address, NamespaceId};
use symbol_providers::{Provider, ProviderError, RestClient};

const OPTION: &str = "target-address";
const MESSAGE: &str = "Enter the target address or @alias:";

/// Resolves an account address, `--target-address` > prompt.
///
/// Values starting with `@` name a namespace and resolve through the node;
/// anything else must parse as an encoded address.
#[derive(Clone, Copy, Debug)]
pub struct AddressResolver<'a, C> {
    flag: Option<&'a str>,
    provider: &'a Provider<C>,
}

impl<'a, C> AddressResolver<'a, C> {
    pub fn new(flag: Option<&'a str>, provider: &'a Provider<C>) -> Self {
        Self { flag, provider }
    }
}

#[async_trait]
impl<C: RestClient> Resolve for AddressResolver<'_, C> {
    type Output = Address;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<Address, ResolveError> {
        let raw = text_source(OPTION, self.flag, None, prompt, MESSAGE).await?;
        if let Some(alias) = raw.strip_prefix('@') {
            let namespace = NamespaceId::from_name(alias);
            return self.provider.resolve_address_alias(&namespace).await.map_err(|err| {
                match err {
                    ProviderError::AliasNotFound(_) => {
                        ResolveError::AliasResolution(alias.to_string())
                    }
                    other => ResolveError::NetworkQuery(other),
                }
            })
        }
        raw.parse().map_err(|err| ResolveError::invalid(OPTION, format!("{err} ({raw})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::{DisabledPrompt, ScriptedPrompt};
    use serde_json::json;
    use symbol_core::types::{NetworkType, PublicKey};
    use symbol_providers::MockClient;

    fn aliased() -> Address {
        let key: PublicKey =
            "D75A980182B10AB7D54BFED3C964073A0EE172F3DAA62325AF021A68F707511A".parse().unwrap();
        Address::from_public_key(&key, NetworkType::TestNet)
    }

    #[tokio::test]
    async fn plain_addresses_resolve_offline() {
        let (provider, mock) = Provider::<MockClient>::mocked();
        let encoded = aliased().encoded();
        let address = AddressResolver::new(Some(encoded.as_str()), &provider)
            .resolve(&DisabledPrompt)
            .await
            .unwrap();
        assert_eq!(address, aliased());
        // no request was made
        assert!(mock.assert_request("GET", "").is_err());
    }

    #[tokio::test]
    async fn aliases_resolve_through_the_node() {
        let (provider, mock) = Provider::mocked();
        mock.push::<serde_json::Value, _>(json!({
            "namespace": { "alias": { "type": 2, "address": aliased().encoded() } }
        }))
        .unwrap();

        let address = AddressResolver::new(Some("@alias1"), &provider)
            .resolve(&DisabledPrompt)
            .await
            .unwrap();
        assert_eq!(address, aliased());
        let namespace = NamespaceId::from_name("alias1");
        mock.assert_request("GET", &format!("namespaces/{namespace}")).unwrap();
    }

    #[tokio::test]
    async fn unresolvable_aliases_are_distinct_from_format_errors() {
        let (provider, mock) = Provider::mocked();
        // the namespace exists but aliases a mosaic
        mock.push::<serde_json::Value, _>(json!({
            "namespace": { "alias": { "type": 1, "mosaicId": "6BED913FA20223F8" } }
        }))
        .unwrap();

        let err = AddressResolver::new(Some("@alias1"), &provider)
            .resolve(&DisabledPrompt)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::AliasResolution(alias) if alias == "alias1"));

        let err = AddressResolver::new(Some("not-an-address"), &provider)
            .resolve(&DisabledPrompt)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidOptionFormat { option: "target-address", .. }));
    }

    #[tokio::test]
    async fn prompted_values_get_the_same_validation() {
        let (provider, _mock) = Provider::<MockClient>::mocked();
        let prompt = ScriptedPrompt::new();
        prompt.push(aliased().pretty());

        let address = AddressResolver::new(None, &provider).resolve(&prompt).await.unwrap();
        assert_eq!(address, aliased());
        assert_eq!(prompt.asked(), [MESSAGE]);
    }
}
