//! HTTP client utilities for TurboCommerce browser workloads.
//!
//! Requests are built with a small builder API and handed to a
//! [`Transport`]. In the browser that is [`BrowserTransport`] (feature
//! `browser`, `wasm32` only); in tests it is [`MockTransport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use turbo_data::{FetchClient, BrowserTransport};
//!
//! let client = FetchClient::new(Rc::new(BrowserTransport));
//!
//! let response = client
//!     .post("/cart/add-ajax/42")
//!     .json(&serde_json::json!({ "qty": "2" }))?
//!     .send()
//!     .await?;
//! let body: serde_json::Value = response.json()?;
//! ```

use std::rc::Rc;

mod error;
mod request;
mod response;
mod transport;

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
mod browser;

pub use error::FetchError;
pub use request::{Method, Request, RequestBuilder, APPLICATION_JSON};
pub use response::Response;
pub use transport::{MockTransport, Transport};

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub use browser::BrowserTransport;

/// HTTP client for making outbound requests.
///
/// A thin builder front-end over a shared [`Transport`].
#[derive(Clone)]
pub struct FetchClient {
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient").finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport.
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            builder: RequestBuilder::new(method, url),
            transport: Rc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client's transport.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Rc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Set the Content-Type header.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.content_type(content_type);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.send(self.builder.build()).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}
