//! Client for the add-to-cart endpoint.

use serde::Serialize;
use turbo_data::{FetchClient, APPLICATION_JSON};

use crate::config::PRODUCT_ID_PLACEHOLDER;
use crate::ids::ProductId;
use crate::outcome::AddOutcome;

#[derive(Serialize)]
struct QuantityBody<'a> {
    qty: &'a str,
}

/// Issues add-to-cart requests.
#[derive(Debug, Clone)]
pub struct CartClient {
    http: FetchClient,
    add_template: String,
}

impl CartClient {
    /// Create a client for an endpoint template containing `{product_id}`.
    pub fn new(http: FetchClient, add_template: impl Into<String>) -> Self {
        Self {
            http,
            add_template: add_template.into(),
        }
    }

    /// Endpoint URL for a product.
    pub fn add_url(&self, product_id: &ProductId) -> String {
        self.add_template
            .replace(PRODUCT_ID_PLACEHOLDER, product_id.as_str())
    }

    /// `POST` with a JSON content type and no body.
    pub async fn add(&self, product_id: &ProductId) -> AddOutcome {
        let result = self
            .http
            .post(self.add_url(product_id))
            .content_type(APPLICATION_JSON)
            .send()
            .await;
        AddOutcome::from_result(result)
    }

    /// `POST` with `{"qty": <raw>}`; the raw field text is sent as-is.
    pub async fn add_with_quantity(&self, product_id: &ProductId, raw_qty: &str) -> AddOutcome {
        let request = match self
            .http
            .post(self.add_url(product_id))
            .json(&QuantityBody { qty: raw_qty })
        {
            Ok(request) => request,
            Err(e) => return AddOutcome::Failed(e),
        };
        AddOutcome::from_result(request.send().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;
    use turbo_data::{FetchError, Method, MockTransport, Response};

    fn client() -> (CartClient, Rc<MockTransport>) {
        let mock = Rc::new(MockTransport::new());
        let http = FetchClient::new(mock.clone());
        (CartClient::new(http, "/cart/add-ajax/{product_id}"), mock)
    }

    #[test]
    fn test_add_without_body() {
        let (client, mock) = client();
        mock.respond(Response::json_body(200, &json!({"success": true})));

        let id = ProductId::new("65f1c2").unwrap();
        assert!(block_on(client.add(&id)).is_added());

        let sent = &mock.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/cart/add-ajax/65f1c2");
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert!(sent.body.is_none());
    }

    #[test]
    fn test_add_with_raw_quantity() {
        let (client, mock) = client();
        mock.respond(Response::json_body(200, &json!({"success": true})));

        let id = ProductId::new("p9").unwrap();
        block_on(client.add_with_quantity(&id, "03"));

        let sent = &mock.requests()[0];
        assert_eq!(sent.body_text(), Some(r#"{"qty":"03"}"#));
        assert_eq!(sent.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_network_failure() {
        let (client, mock) = client();
        mock.fail(FetchError::RequestError("offline".into()));

        let id = ProductId::new("p1").unwrap();
        let outcome = block_on(client.add(&id));
        assert_eq!(outcome, AddOutcome::Failed(FetchError::RequestError("offline".into())));
    }

    #[test]
    fn test_prefixed_template() {
        let (_, mock) = client();
        let client = CartClient::new(FetchClient::new(mock), "/shop/cart/{product_id}/add");
        let id = ProductId::new("x1").unwrap();
        assert_eq!(client.add_url(&id), "/shop/cart/x1/add");
    }
}
