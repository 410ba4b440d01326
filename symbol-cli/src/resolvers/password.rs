use super::{secret_source, Prompt, Resolve, ResolveError};
use async_trait::async_trait;
use zeroize::Zeroizing;

const OPTION: &str = "password";
const MESSAGE: &str = "Enter your wallet password:";
const MIN_LEN: usize = 8;

/// Resolves the profile password, `--password` > hidden prompt.
///
/// The value is never logged or echoed; validation messages state the length
/// rule only.
#[derive(Clone, Copy, Debug)]
pub struct PasswordResolver<'a> {
    flag: Option<&'a str>,
}

impl<'a> PasswordResolver<'a> {
    pub fn new(flag: Option<&'a str>) -> Self {
        Self { flag }
    }
}

#[async_trait]
impl Resolve for PasswordResolver<'_> {
    type Output = Zeroizing<String>;

    async fn resolve(&self, prompt: &dyn Prompt) -> Result<Zeroizing<String>, ResolveError> {
        let raw = secret_source(OPTION, self.flag, prompt, MESSAGE).await?;
        if raw.len() < MIN_LEN {
            return Err(ResolveError::invalid(
                OPTION,
                format!("password must be at least {MIN_LEN} characters"),
            ))
        }
        Ok(raw)
    }
}
