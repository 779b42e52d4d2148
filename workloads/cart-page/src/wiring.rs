//! Attaching page event listeners to the [`CartPage`].

use std::rc::Rc;

use turbo_cart::actions::cancels_default;
use turbo_cart::{CartPage, CartUiError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::adapters::InputField;
use crate::params::params_from_attributes;

/// Counts of elements that received listeners.
#[derive(Debug, Default, Clone, Copy)]
pub struct WiringReport {
    pub quantity_inputs: usize,
    pub remove_controls: usize,
    pub action_triggers: usize,
    pub buy_form: bool,
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> bool {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let attached = target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_ok();
    // Listeners live as long as the page.
    callback.forget();
    attached
}

/// Attach every listener the configuration describes.
pub fn wire(page: &Rc<CartPage>, document: &Document) -> WiringReport {
    let selectors = page.config().selectors.clone();
    let mut report = WiringReport::default();

    for element in elements(document, &format!(".{}", selectors.quantity_class)) {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            page.on_wiring_error(&CartUiError::WrongElementType {
                selector: format!(".{}", selectors.quantity_class),
                expected: "input".to_string(),
            });
            continue;
        };
        let page = Rc::clone(page);
        let field = InputField::new(input.clone());
        if listen(&input, "change", move |_event| {
            page.on_quantity_change(&field);
        }) {
            report.quantity_inputs += 1;
        }
    }

    for element in elements(document, &format!(".{}", selectors.remove_class)) {
        let page = Rc::clone(page);
        if listen(&element, "click", move |event| {
            if page.on_remove_click().should_prevent_default() {
                event.prevent_default();
            }
        }) {
            report.remove_controls += 1;
        }
    }

    if let Some(form) = document.get_element_by_id(&selectors.buy_form_id) {
        let page = Rc::clone(page);
        report.buy_form = listen(&form, "submit", move |_event| page.on_buy_now_submit());
    }

    let attribute = selectors.action_attribute.clone();
    for element in elements(document, &format!("[{}]", attribute)) {
        let Some(action) = element.get_attribute(&attribute) else {
            continue;
        };
        let page = Rc::clone(page);
        let attribute = attribute.clone();
        let trigger = element.clone();
        if listen(&element, "click", move |event| {
            if cancels_default(&action) {
                event.prevent_default();
            }
            let names = trigger.get_attribute_names();
            let pairs: Vec<(String, String)> = names
                .iter()
                .filter_map(|name| name.as_string())
                .filter_map(|name| trigger.get_attribute(&name).map(|value| (name, value)))
                .collect();
            let params = params_from_attributes(
                &action,
                &attribute,
                pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
            spawn_local(page.run_action(params));
        }) {
            report.action_triggers += 1;
        }
    }

    report
}
