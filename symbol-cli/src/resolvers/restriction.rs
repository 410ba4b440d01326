//! Resolvers for the restriction key and the value it is set to.

use super::{parse_u64, text_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;

/// Resolves the restriction key, `--restriction-key` > prompt.
#[derive(Clone, Copy, Debug)]
pub struct RestrictionKeyResolver<'a> {
    flag: Option<&'a str>,
}

impl<'a> RestrictionKeyResolver<'a> {
    pub fn new(flag: Option<&'a str>) -> Self {
        Self { flag }
    }
}

#[async_trait]
impl Resolve for RestrictionKeyResolver<'_> {
    type Output = u64;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<u64, ResolveError> {
        let raw =
            text_source("restriction-key", self.flag, None, prompt, "Enter the restriction key:")
                .await?;
        parse_u64("restriction-key", &raw)
    }
}

/// Resolves the new restriction value, `--new-restriction-value` > prompt.
#[derive(Clone, Copy, Debug)]
pub struct RestrictionValueResolver<'a> {
    flag: Option<&'a str>,
}

impl<'a> RestrictionValueResolver<'a> {
    pub fn new(flag: Option<&'a str>) -> Self {
        Self { flag }
    }
}

#[async_trait]
impl Resolve for RestrictionValueResolver<'_> {
    type Output = u64;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<u64, ResolveError> {
        let raw = text_source(
            "new-restriction-value",
            self.flag,
            None,
            prompt,
            "Enter the new restriction value:",
        )
        .await?;
        parse_u64("new-restriction-value", &raw)
    }
}
