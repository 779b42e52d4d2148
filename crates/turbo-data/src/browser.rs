//! `window.fetch` transport.

use std::collections::HashMap;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request as WebRequest, RequestInit, Response as WebResponse};

use crate::{FetchError, Request, Response, Transport};

/// Transport backed by the browser Fetch API.
///
/// A rejected fetch promise maps to [`FetchError::RequestError`]; any
/// response that arrives, whatever its status, is returned as `Ok`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

fn js_error(context: &str, value: JsValue) -> FetchError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    FetchError::RequestError(format!("{}: {}", context, detail))
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let window = web_sys::window()
            .ok_or_else(|| FetchError::RequestError("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = request.body_text() {
            init.set_body(&JsValue::from_str(body));
        }

        let web_request = WebRequest::new_with_str_and_init(&request.url, &init)
            .map_err(|e| js_error("build request", e))?;
        let headers = web_request.headers();
        for (key, value) in &request.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("set header", e))?;
        }

        let value = JsFuture::from(window.fetch_with_request(&web_request))
            .await
            .map_err(|e| js_error("fetch", e))?;
        let web_response: WebResponse = value
            .dyn_into()
            .map_err(|_| FetchError::RequestError("fetch resolved to a non-Response".to_string()))?;

        let status = web_response.status();
        let mut response_headers = HashMap::new();
        if let Ok(Some(content_type)) = web_response.headers().get("content-type") {
            response_headers.insert("Content-Type".to_string(), content_type);
        }

        let text_promise = web_response
            .text()
            .map_err(|e| js_error("read body", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_error("read body", e))?;
        let body = text.as_string().unwrap_or_default().into_bytes();

        Ok(Response::new(status, response_headers, body))
    }
}
