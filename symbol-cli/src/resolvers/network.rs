use super::{text_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;
use symbol_core::types::NetworkType;

const OPTION: &str = "network";
const MESSAGE: &str = "Enter the network type (MAIN_NET, TEST_NET, MIJIN, MIJIN_TEST):";

/// Resolves the network type, `--network` > profile > prompt.
///
/// Commands running against a profile pass its network as the secondary
/// source, so the prompt is only ever reached by profile-less commands.
#[derive(Clone, Copy, Debug)]
pub struct NetworkResolver<'a> {
    flag: Option<&'a str>,
    profile_network: Option<NetworkType>,
}

impl<'a> NetworkResolver<'a> {
    pub fn new(flag: Option<&'a str>, profile_network: Option<NetworkType>) -> Self {
        Self { flag, profile_network }
    }
}

#[async_trait]
impl Resolve for NetworkResolver<'_> {
    type Output = NetworkType;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<NetworkType, ResolveError> {
        let raw = text_source(
            OPTION,
            self.flag,
            self.profile_network.map(|network| network.to_string()),
            prompt,
            MESSAGE,
        )
        .await?;
        raw.parse()
            .map_err(|_| ResolveError::invalid(OPTION, format!("unknown network type {raw:?}")))
    }
}
