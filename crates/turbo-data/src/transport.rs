//! The seam between request building and the network.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends a built request and resolves to its response.
///
/// Futures are `!Send`: transports run on the browser's single-threaded
/// event loop.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Scripted transport for tests.
///
/// Each `send` pops the next scripted result and records the request.
/// An empty script behaves like a network failure.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<Response, FetchError>>>,
    sent: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(&self, response: Response) -> &Self {
        self.script.borrow_mut().push_back(Ok(response));
        self
    }

    /// Queue a failure.
    pub fn fail(&self, error: FetchError) -> &Self {
        self.script.borrow_mut().push_back(Err(error));
        self
    }

    /// Requests sent so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.sent.borrow().clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        self.sent.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestError("no scripted response".to_string())))
    }
}
