use crate::{ProviderError, RestError};
use async_trait::async_trait;
use auto_impl::auto_impl;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

#[async_trait]
#[auto_impl(&, Box, Arc)]
/// Trait which must be implemented by data transports to be used with the
/// Symbol REST provider.
pub trait RestClient: Debug + Send + Sync {
    /// A client error
    type Error: Into<ProviderError> + RestError;

    /// Fetches `path` from the gateway and deserializes the JSON response
    async fn get<R>(&self, path: &str) -> Result<R, Self::Error>
    where
        R: DeserializeOwned + Send;

    /// PUTs a JSON body to `path` and deserializes the response
    async fn put<T, R>(&self, path: &str, body: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send;
}
