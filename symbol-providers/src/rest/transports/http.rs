use super::common::NodeError;
use crate::{errors::ProviderError, RestClient};
use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, str::FromStr};
use thiserror::Error;
use url::Url;

/// A low-level client for a Symbol REST gateway over HTTP.
///
/// # Example
///
/// ```no_run
/// use symbol_providers::{Http, RestClient};
/// use std::str::FromStr;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Http::from_str("http://localhost:3000")?;
/// let info: serde_json::Value = client.get("node/info").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Provider {
    client: Client,
    url: Url,
}

#[derive(Error, Debug)]
/// Error thrown when sending an HTTP request
pub enum ClientError {
    /// Thrown if the request failed
    #[error(transparent)]
    ReqwestError(#[from] ReqwestError),

    /// Thrown if the endpoint path cannot be joined onto the node URL
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    /// An error body returned by the node
    #[error(transparent)]
    NodeError(#[from] NodeError),

    #[error("Deserialization Error: {err}. Response: {text}")]
    /// Serde JSON Error
    SerdeJson {
        /// Underlying error
        err: serde_json::Error,
        /// The contents of the HTTP response that could not be deserialized
        text: String,
    },
}

impl From<ClientError> for ProviderError {
    fn from(src: ClientError) -> Self {
        match src {
            ClientError::ReqwestError(err) => ProviderError::HTTPError(err),
            _ => ProviderError::RestClientError(Box::new(src)),
        }
    }
}

impl crate::RestError for ClientError {
    fn as_error_response(&self) -> Option<&NodeError> {
        if let ClientError::NodeError(err) = self {
            Some(err)
        } else {
            None
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            ClientError::SerdeJson { err, .. } => Some(err),
            _ => None,
        }
    }
}

#[async_trait]
impl RestClient for Provider {
    type Error = ClientError;

    async fn get<R>(&self, path: &str) -> Result<R, ClientError>
    where
        R: DeserializeOwned + Send,
    {
        let url = self.url.join(path)?;
        let res = self.client.get(url).send().await?;
        decode_response(res).await
    }

    async fn put<T, R>(&self, path: &str, body: T) -> Result<R, ClientError>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.url.join(path)?;
        let res = self.client.put(url).json(&body).send().await?;
        decode_response(res).await
    }
}

/// Gateways report failures with a non-2xx status and a JSON body carrying a
/// code and message. Bodies that are not JSON (e.g. a reverse proxy error
/// page) are folded into a synthetic code from the HTTP status.
async fn decode_response<R: DeserializeOwned>(res: Response) -> Result<R, ClientError> {
    let status = res.status();
    let body = res.bytes().await?;

    if !status.is_success() {
        let error = serde_json::from_slice::<NodeError>(&body).unwrap_or_else(|_| NodeError {
            code: format!("HTTP{}", status.as_u16()),
            message: String::from_utf8_lossy(&body).to_string(),
        });
        return Err(error.into())
    }

    serde_json::from_slice(&body).map_err(|err| ClientError::SerdeJson {
        err,
        text: String::from_utf8_lossy(&body).to_string(),
    })
}

impl Provider {
    /// Initializes a new HTTP client
    ///
    /// # Example
    ///
    /// ```
    /// use symbol_providers::Http;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://localhost:3000").unwrap();
    /// let client = Http::new(url);
    /// ```
    pub fn new(url: impl Into<Url>) -> Self {
        Self::new_with_client(url, Client::new())
    }

    /// The Url to which requests are made
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Mutable access to the Url to which requests are made
    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Allows to customize the client by providing your own http client
    ///
    /// # Example
    ///
    /// ```
    /// use symbol_providers::Http;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://localhost:3000").unwrap();
    /// let client = reqwest::Client::builder().build().unwrap();
    /// let client = Http::new_with_client(url, client);
    /// ```
    pub fn new_with_client(url: impl Into<Url>, client: reqwest::Client) -> Self {
        Self { client, url: url.into() }
    }
}

impl FromStr for Provider {
    type Err = url::ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(src)?;
        Ok(Provider::new(url))
    }
}
