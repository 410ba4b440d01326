use super::{parse_u64, text_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;

const OPTION: &str = "max-fee";
const MESSAGE: &str = "Enter the max fee in absolute units:";

/// Resolves the max fee, `--max-fee` > profile default > prompt.
#[derive(Clone, Copy, Debug)]
pub struct MaxFeeResolver<'a> {
    flag: Option<&'a str>,
    profile_default: Option<u64>,
}

impl<'a> MaxFeeResolver<'a> {
    pub fn new(flag: Option<&'a str>, profile_default: Option<u64>) -> Self {
        Self { flag, profile_default }
    }
}

#[async_trait]
impl Resolve for MaxFeeResolver<'_> {
    type Output = u64;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<u64, ResolveError> {
        let raw = text_source(
            OPTION,
            self.flag,
            self.profile_default.map(|fee| fee.to_string()),
            prompt,
            MESSAGE,
        )
        .await?;
        parse_u64(OPTION, &raw)
    }
}
