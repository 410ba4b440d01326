//! Option resolution with flag > profile > prompt precedence.
//!
//! Every command parameter has one resolver. A resolver consults, in order,
//! the explicit CLI flag (if present and non-empty), the active profile (for
//! profile-scoped options) and finally the installed [`Prompt`]; the first
//! source with a value wins and later sources are never consulted. Within one
//! command invocation each option is resolved exactly once.
//!
//! Resolvers differ only in the flag they read, their validation and whether
//! resolution needs a network round-trip (`@alias` lookups do).

mod prompt;
pub use prompt::{DisabledPrompt, Prompt, PromptError, ScriptedPrompt, TtyPrompt};

mod address;
pub use address::AddressResolver;

mod max_fee;
pub use max_fee::MaxFeeResolver;

mod mosaic;
pub use mosaic::MosaicResolver;

mod network;
pub use network::NetworkResolver;

mod password;
pub use password::PasswordResolver;

mod private_key;
pub use private_key::PrivateKeyResolver;

mod restriction;
pub use restriction::{RestrictionKeyResolver, RestrictionValueResolver};

use async_trait::async_trait;
use symbol_providers::ProviderError;
use thiserror::Error;
use zeroize::Zeroizing;

/// An error while resolving a command option.
///
/// Validation messages describe the expected shape; for secrets they never
/// include the supplied value.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No source yielded a value and prompting is disallowed
    #[error("missing required option --{0}")]
    MissingRequiredOption(&'static str),
    /// A supplied value failed the option's validation
    #[error("invalid --{option}: {reason}")]
    InvalidOptionFormat { option: &'static str, reason: String },
    /// The namespace behind an `@alias` value does not exist or does not
    /// alias the expected kind of thing
    #[error("could not resolve alias @{0}")]
    AliasResolution(String),
    /// A network lookup needed by the resolver failed
    #[error(transparent)]
    NetworkQuery(ProviderError),
    /// The prompt itself failed
    #[error(transparent)]
    Prompt(PromptError),
}

impl ResolveError {
    pub(crate) fn invalid(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOptionFormat { option, reason: reason.into() }
    }
}

/// Resolves one logical option from the layered sources.
#[async_trait]
pub trait Resolve {
    type Output;

    /// Produces the option's value, possibly suspending for interactive
    /// input or a network lookup
    async fn resolve(&self, prompt: &dyn Prompt) -> Result<Self::Output, ResolveError>;
}

/// Applies the precedence order for plain text values.
pub(crate) async fn text_source(
    option: &'static str,
    flag: Option<&str>,
    profile_value: Option<String>,
    prompt: &dyn Prompt,
    message: &str,
) -> Result<String, ResolveError> {
    if let Some(value) = flag {
        if !value.is_empty() {
            return Ok(value.to_string())
        }
    }
    if let Some(value) = profile_value {
        return Ok(value)
    }
    match prompt.input(message).await {
        Ok(value) => Ok(value),
        Err(PromptError::Unavailable) => Err(ResolveError::MissingRequiredOption(option)),
        Err(err) => Err(ResolveError::Prompt(err)),
    }
}

/// The same precedence for secrets, read without echo and wiped on drop.
pub(crate) async fn secret_source(
    option: &'static str,
    flag: Option<&str>,
    prompt: &dyn Prompt,
    message: &str,
) -> Result<Zeroizing<String>, ResolveError> {
    if let Some(value) = flag {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value.to_string()))
        }
    }
    match prompt.secret(message).await {
        Ok(value) => Ok(value),
        Err(PromptError::Unavailable) => Err(ResolveError::MissingRequiredOption(option)),
        Err(err) => Err(ResolveError::Prompt(err)),
    }
}

pub(crate) fn parse_u64(option: &'static str, raw: &str) -> Result<u64, ResolveError> {
    raw.parse()
        .map_err(|_| ResolveError::invalid(option, format!("expected a decimal number, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flag_wins_over_profile_and_prompt() {
        let prompt = ScriptedPrompt::new();
        let value =
            text_source("network", Some("TEST_NET"), Some("MAIN_NET".into()), &prompt, "Network?")
                .await
                .unwrap();
        assert_eq!(value, "TEST_NET");
        assert!(prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn empty_flag_falls_through_to_profile() {
        let prompt = ScriptedPrompt::new();
        let value = text_source("network", Some(""), Some("MAIN_NET".into()), &prompt, "Network?")
            .await
            .unwrap();
        assert_eq!(value, "MAIN_NET");
        assert!(prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn prompt_is_the_last_resort() {
        let prompt = ScriptedPrompt::new();
        prompt.push("MIJIN");
        let value = text_source("network", None, None, &prompt, "Network?").await.unwrap();
        assert_eq!(value, "MIJIN");
        assert_eq!(prompt.asked(), ["Network?"]);
    }

    #[tokio::test]
    async fn no_source_without_prompt_is_a_missing_option() {
        let err = text_source("network", None, None, &DisabledPrompt, "Network?")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingRequiredOption("network")));

        let err = secret_source("password", None, &DisabledPrompt, "Password?")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingRequiredOption("password")));
    }
}
