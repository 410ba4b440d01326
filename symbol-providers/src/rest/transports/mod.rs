pub(crate) mod common;
pub use common::NodeError;

mod http;
pub use self::http::{ClientError as HttpClientError, Provider as Http};

mod mock;
pub use mock::{MockClient, MockError, MockResponse};
