use super::{text_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;
use symbol_core::types::{MosaicId, NamespaceId};
use symbol_providers::{Provider, ProviderError, RestClient};

const OPTION: &str = "mosaic-id";
const MESSAGE: &str = "Enter the mosaic id in hex or @alias:";

/// Resolves a mosaic identifier, `--mosaic-id` > prompt.
///
/// `@alias` values resolve through the node; anything else must be a 16
/// character hex identifier.
#[derive(Clone, Copy, Debug)]
pub struct MosaicResolver<'a, C> {
    flag: Option<&'a str>,
    provider: &'a Provider<C>,
}

impl<'a, C> MosaicResolver<'a, C> {
    pub fn new(flag: Option<&'a str>, provider: &'a Provider<C>) -> Self {
        Self { flag, provider }
    }
}

#[async_trait]
impl<C: RestClient> Resolve for MosaicResolver<'_, C> {
    type Output = MosaicId;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<MosaicId, ResolveError> {
        let raw = text_source(OPTION, self.flag, None, prompt, MESSAGE).await?;
        if let Some(alias) = raw.strip_prefix('@') {
            let namespace = NamespaceId::from_name(alias);
            return self.provider.resolve_mosaic_alias(&namespace).await.map_err(|err| {
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
