use super::common::NodeError;
use crate::{ProviderError, RestClient};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    borrow::Borrow,
    collections::VecDeque,
    fmt::Debug,
    sync::{Arc, Mutex},
};
use thiserror::Error;

/// Helper response type for `MockClient`, allowing custom gateway errors to
/// be provided. `Value` for successful responses, `Error` for node errors.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Successful response with a `serde_json::Value`.
    Value(Value),

    /// Error response with a [`NodeError`].
    Error(NodeError),
}

#[derive(Clone, Debug)]
/// Mock transport used in test environments.
pub struct MockClient {
    requests: Arc<Mutex<VecDeque<(String, String, Option<Value>)>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestClient for MockClient {
    type Error = MockError;

    async fn get<R>(&self, path: &str) -> Result<R, MockError>
    where
        R: DeserializeOwned + Send,
    {
        self.requests.lock().unwrap().push_back(("GET".to_owned(), path.to_owned(), None));
        self.respond()
    }

    async fn put<T, R>(&self, path: &str, body: T) -> Result<R, MockError>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)?;
        self.requests.lock().unwrap().push_back(("PUT".to_owned(), path.to_owned(), Some(body)));
        self.respond()
    }
}

impl MockClient {
    /// Instantiates a mock transport
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(VecDeque::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Pops the response from the back of the `responses` queue
    fn respond<R: DeserializeOwned>(&self) -> Result<R, MockError> {
        let mut data = self.responses.lock().unwrap();
        let element = data.pop_back().ok_or(MockError::EmptyResponses)?;
        match element {
            MockResponse::Value(value) => {
                let res: R = serde_json::from_value(value)?;
                Ok(res)
            }
            MockResponse::Error(error) => Err(MockError::NodeError(error)),
        }
    }

    /// Pushes the data to the responses
    pub fn push<T: Serialize + Send + Sync, K: Borrow<T>>(&self, data: K) -> Result<(), MockError> {
        let value = serde_json::to_value(data.borrow())?;
        self.responses.lock().unwrap().push_back(MockResponse::Value(value));
        Ok(())
    }

    /// Pushes the data or error to the responses
    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Checks that the provided bodyless request was submitted by the client
    pub fn assert_request(&self, method: &str, path: &str) -> Result<(), MockError> {
        let (m, p, body) =
            self.requests.lock().unwrap().pop_front().ok_or(MockError::EmptyRequests)?;
        assert_eq!(m, method);
        assert_eq!(p, path);
        assert_eq!(body, None);
        Ok(())
    }

    /// Checks that the provided request and body were submitted by the client
    pub fn assert_request_with_body<T: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: T,
    ) -> Result<(), MockError> {
        let (m, p, recorded) =
            self.requests.lock().unwrap().pop_front().ok_or(MockError::EmptyRequests)?;
        assert_eq!(m, method);
        assert_eq!(p, path);
        let expected = serde_json::to_value(body).expect("could not serialize data");
        assert_eq!(recorded, Some(expected));
        Ok(())
    }
}

#[derive(Error, Debug)]
/// Errors for the `MockClient`
pub enum MockError {
    /// (De)Serialization error
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Empty requests array
    #[error("empty requests array, please push some requests")]
    EmptyRequests,

    /// Empty responses array
    #[error("empty responses array, please push some responses")]
    EmptyResponses,

    /// A mocked error body from the node
    #[error("node error: {0}")]
    NodeError(NodeError),
}

impl crate::RestError for MockError {
    fn as_error_response(&self) -> Option<&NodeError> {
        match self {
            MockError::NodeError(e) => Some(e),
            _ => None,
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            MockError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MockError> for ProviderError {
    fn from(src: MockError) -> Self {
        ProviderError::RestClientError(Box::new(src))
    }
}
