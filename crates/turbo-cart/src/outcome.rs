//! Result contract shared by every add-to-cart call.

use serde_json::Value;
use turbo_data::{FetchError, Response};

/// How an add-to-cart request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Response body carried a truthy `success`.
    Added { status: u16 },
    /// Response body was JSON but `success` was falsy or missing.
    Rejected { status: u16 },
    /// No response, or a body that could not be read as a JSON object.
    Failed(FetchError),
}

impl AddOutcome {
    /// Classify the transport result of an add-to-cart request.
    ///
    /// The body decides, not the status: the endpoint answers an unknown
    /// product with 404 and `{"success": false}`, which is a rejection.
    pub fn from_result(result: Result<Response, FetchError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return AddOutcome::Failed(e),
        };

        let body: Value = match response.json() {
            Ok(body) => body,
            // An unreadable error page still reports its status.
            Err(e) => return AddOutcome::Failed(response.error_for_status().err().unwrap_or(e)),
        };

        if body.is_null() {
            return AddOutcome::Failed(FetchError::ParseError(
                "response body is null".to_string(),
            ));
        }

        if is_truthy(body.get("success")) {
            AddOutcome::Added {
                status: response.status,
            }
        } else {
            AddOutcome::Rejected {
                status: response.status,
            }
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }

    /// HTTP status, when a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            AddOutcome::Added { status } | AddOutcome::Rejected { status } => Some(*status),
            AddOutcome::Failed(FetchError::HttpError { status, .. }) => Some(*status),
            AddOutcome::Failed(_) => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            AddOutcome::Added { .. } => "added",
            AddOutcome::Rejected { .. } => "rejected",
            AddOutcome::Failed(_) => "failed",
        }
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""` and absence are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
