//! `web-sys` implementations of the cart page collaborators.

use std::time::Duration;

use turbo_cart::dom::{Dialogs, MountedToast, QuantityField, Scheduler, ToastHost};
use turbo_cart::{CartUiError, Toast};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, Window};

fn dom_error(context: &str, value: JsValue) -> CartUiError {
    CartUiError::Dom(format!(
        "{}: {}",
        context,
        value.as_string().unwrap_or_else(|| format!("{:?}", value))
    ))
}

/// An `<input>` holding a quantity.
pub struct InputField(HtmlInputElement);

impl InputField {
    pub fn new(input: HtmlInputElement) -> Self {
        Self(input)
    }
}

impl QuantityField for InputField {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }
}

/// `window.confirm` / `window.alert`.
pub struct WindowDialogs(Window);

impl WindowDialogs {
    pub fn new(window: Window) -> Self {
        Self(window)
    }
}

impl Dialogs for WindowDialogs {
    fn confirm(&self, message: &str) -> bool {
        // A suppressed dialog reads as "no", as in the browser itself.
        self.0.confirm_with_message(message).unwrap_or(false)
    }

    fn alert(&self, message: &str) -> Result<(), CartUiError> {
        self.0
            .alert_with_message(message)
            .map_err(|e| dom_error("alert", e))
    }
}

/// Appends toasts as `<div>` children of `<body>`.
pub struct BodyToastHost(Document);

impl BodyToastHost {
    pub fn new(document: Document) -> Self {
        Self(document)
    }
}

struct BodyToast(Element);

impl MountedToast for BodyToast {
    fn remove(self: Box<Self>) {
        self.0.remove();
    }
}

impl ToastHost for BodyToastHost {
    fn mount(&self, toast: &Toast) -> Result<Box<dyn MountedToast>, CartUiError> {
        let body = self
            .0
            .body()
            .ok_or_else(|| CartUiError::MissingElement("body".to_string()))?;
        let element = self
            .0
            .create_element("div")
            .map_err(|e| dom_error("create toast", e))?;
        element.set_class_name(&toast.class_name);
        element.set_attribute("role", "status").map_err(|e| dom_error("toast role", e))?;
        element.set_text_content(Some(&toast.message));
        body.append_child(&element)
            .map_err(|e| dom_error("append toast", e))?;
        Ok(Box::new(BodyToast(element)))
    }
}

/// `window.setTimeout`.
pub struct TimeoutScheduler(Window);

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self(window)
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), CartUiError> {
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.0
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            )
            .map(|_| ())
            .map_err(|e| dom_error("setTimeout", e))
    }
}
