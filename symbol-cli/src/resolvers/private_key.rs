use super::{secret_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;
use zeroize::Zeroizing;

const OPTION: &str = "private-key";
const MESSAGE: &str = "Enter your private key:";
const KEY_HEX_LEN: usize = 64;

/// Resolves a private key, `--private-key` > hidden prompt.
///
/// Keys are never stored in profiles in the clear, so there is no profile
/// source. Validation failures report only the expected shape, never the
/// supplied value.
#[derive(Clone, Copy, Debug)]
pub struct PrivateKeyResolver<'a> {
    flag: Option<&'a str>,
}

impl<'a> PrivateKeyResolver<'a> {
    pub fn new(flag: Option<&'a str>) -> Self {
        Self { flag }
    }
}

#[async_trait]
impl Resolve for PrivateKeyResolver<'_> {
    type Output = Zeroizing<String>;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<Zeroizing<String>, ResolveError> {
        let raw = secret_source(OPTION, self.flag, prompt, MESSAGE).await?;
        if raw.len() != KEY_HEX_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ResolveError::invalid(
                OPTION,
                format!("expected {KEY_HEX_LEN} hexadecimal characters"),
            ))
        }
        Ok(raw)
    }
}
