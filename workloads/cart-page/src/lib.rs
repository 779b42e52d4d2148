//! Browser workload for TurboCommerce cart and product pages.
//!
//! The server renders the markup; this module attaches behavior to it:
//! - Quantity inputs are clamped to at least 1 on change
//! - Remove controls ask for confirmation
//! - `[data-cart-action]` triggers run cart actions (add, stepper, mirror)
//! - Outcomes surface as toasts or alerts
//!
//! Configuration comes from the embedded `cart-page.toml`, overridden by a
//! `<script id="cart-page-config" type="application/json">` element when
//! the page carries one.

pub mod params;
pub mod settings;

#[cfg(target_arch = "wasm32")]
mod adapters;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod wiring;

#[cfg(target_arch = "wasm32")]
pub use browser::{dispatch, start};

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{anyhow, Context, Result};
    use js_sys::{Array, Object, Promise};
    use turbo_cart::dom::QuantityField;
    use turbo_cart::{ActionParams, CartPage, CartPageDeps};
    use turbo_data::BrowserTransport;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::future_to_promise;
    use web_sys::{console, Document, HtmlInputElement};

    use crate::adapters::{BodyToastHost, InputField, TimeoutScheduler, WindowDialogs};
    use crate::console::ConsoleSink;
    use crate::settings;
    use crate::wiring::wire;

    thread_local! {
        static PAGE: RefCell<Option<Rc<CartPage>>> = const { RefCell::new(None) };
    }

    fn input_by_id(document: &Document, id: &str) -> Option<Rc<dyn QuantityField>> {
        let input = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(Rc::new(InputField::new(input)))
    }

    fn boot() -> Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("window has no document"))?;

        let base = settings::embedded()?;
        let overrides = document
            .get_element_by_id(&base.selectors.config_element_id)
            .and_then(|element| element.text_content());
        let config = settings::with_overrides(base, overrides.as_deref())?;

        let deps = CartPageDeps {
            transport: Rc::new(BrowserTransport),
            dialogs: Rc::new(WindowDialogs::new(window.clone())),
            toast_host: Rc::new(BodyToastHost::new(document.clone())),
            scheduler: Rc::new(TimeoutScheduler::new(window)),
            log_sink: Rc::new(ConsoleSink),
            quantity: input_by_id(&document, &config.selectors.quantity_id),
            buy_quantity: input_by_id(&document, &config.selectors.buy_quantity_id),
        };
        let page = Rc::new(CartPage::new(config, deps).context("cart page wiring failed")?);

        let report = wire(&page, &document);
        page.logger()
            .info_builder("cart page ready")
            .field_i64("quantity_inputs", report.quantity_inputs as i64)
            .field_i64("remove_controls", report.remove_controls as i64)
            .field_i64("action_triggers", report.action_triggers as i64)
            .field_bool("buy_form", report.buy_form)
            .emit();

        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    fn boot_or_report() {
        if let Err(err) = boot() {
            console::error_1(&JsValue::from_str(&format!("cart page failed to start: {:#}", err)));
        }
    }

    /// Module entry point: boots now, or once the document has parsed.
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if document.ready_state() == "loading" {
            let on_ready = Closure::once_into_js(boot_or_report);
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                on_ready.unchecked_ref(),
            )?;
        } else {
            boot_or_report();
        }
        Ok(())
    }

    fn params_from_object(action: &str, params: &JsValue) -> ActionParams {
        if params.is_undefined() || params.is_null() || !params.is_object() {
            return ActionParams::new(action);
        }
        Object::entries(params.unchecked_ref::<Object>())
            .iter()
            .filter_map(|entry| {
                let pair: Array = entry.dyn_into().ok()?;
                let key = pair.get(0).as_string()?;
                let value = pair.get(1);
                let value = value
                    .as_string()
                    .or_else(|| value.as_f64().map(|n| n.to_string()))?;
                Some((key, value))
            })
            .fold(ActionParams::new(action), |acc, (key, value)| acc.with(key, value))
    }

    /// Run a named cart action from script, e.g.
    /// `dispatch("add-to-cart", { "product-id": "42" })`.
    ///
    /// The returned promise rejects with the error message when the action
    /// is unknown or its parameters are invalid.
    #[wasm_bindgen]
    pub fn dispatch(action: &str, params: JsValue) -> Result<Promise, JsValue> {
        let page = PAGE
            .with(|slot| slot.borrow().clone())
            .ok_or_else(|| JsValue::from_str("cart page is not started"))?;
        let future = page.dispatch(params_from_object(action, &params));
        Ok(future_to_promise(async move {
            future
                .await
                .map(|()| JsValue::UNDEFINED)
                .map_err(|err| JsValue::from_str(&err.to_string()))
        }))
    }
}
