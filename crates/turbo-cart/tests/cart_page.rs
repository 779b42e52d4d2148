//! End-to-end cart page flows through the public API.

use std::rc::Rc;
use std::time::Duration;

use futures::executor::block_on;
use serde_json::json;
use turbo_cart::prelude::*;
use turbo_cart::testing::{FakeDialogs, FakeField, FakeToastHost, ManualScheduler};
use turbo_data::{FetchError, MockTransport, Response};
use turbo_observability::{LogLevel, MemorySink};

struct Page {
    page: CartPage,
    transport: Rc<MockTransport>,
    dialogs: Rc<FakeDialogs>,
    toasts: Rc<FakeToastHost>,
    scheduler: Rc<ManualScheduler>,
    logs: Rc<MemorySink>,
    qty: Rc<FakeField>,
    buy_qty: Rc<FakeField>,
}

fn page_with(config: CartPageConfig, dialogs: FakeDialogs) -> Page {
    let transport = Rc::new(MockTransport::new());
    let dialogs = Rc::new(dialogs);
    let toasts = Rc::new(FakeToastHost::default());
    let scheduler = Rc::new(ManualScheduler::default());
    let logs = Rc::new(MemorySink::default());
    let qty = Rc::new(FakeField::new("1"));
    let buy_qty = Rc::new(FakeField::new("1"));

    let page = CartPage::new(
        config,
        CartPageDeps {
            transport: transport.clone(),
            dialogs: dialogs.clone(),
            toast_host: toasts.clone(),
            scheduler: scheduler.clone(),
            log_sink: logs.clone(),
            quantity: Some(qty.clone()),
            buy_quantity: Some(buy_qty.clone()),
        },
    )
    .unwrap();

    Page {
        page,
        transport,
        dialogs,
        toasts,
        scheduler,
        logs,
        qty,
        buy_qty,
    }
}

fn page() -> Page {
    page_with(CartPageConfig::default(), FakeDialogs::accepting())
}

fn add(product_id: &str) -> ActionParams {
    ActionParams::new(ADD_TO_CART).with(PARAM_PRODUCT_ID, product_id)
}

// === Input Guard ===

#[test]
fn test_quantity_change_clamps() {
    let p = page();
    for (raw, expected) in [("0", "1"), ("-2", "1"), ("abc", "1"), ("", "1"), ("4", "4"), ("120", "120")] {
        let field = FakeField::new(raw);
        p.page.on_quantity_change(&field);
        assert_eq!(field.value(), expected, "input {:?}", raw);
    }
}

// === Removal Confirmation ===

#[test]
fn test_remove_declined_cancels_default() {
    let p = page_with(CartPageConfig::default(), FakeDialogs::declining());
    assert!(p.page.on_remove_click().should_prevent_default());
    assert_eq!(p.dialogs.confirms(), vec!["Remove this item from cart?".to_string()]);
}

#[test]
fn test_remove_accepted_keeps_default() {
    let p = page();
    assert_eq!(p.page.on_remove_click(), RemovalDecision::Proceed);
}

// === Add to Cart ===

#[test]
fn test_successful_add_shows_one_toast_for_two_seconds() {
    let p = page();
    p.transport
        .respond(Response::json_body(200, &json!({"success": true})));

    block_on(p.page.dispatch(add("65f1c2"))).unwrap();

    assert_eq!(p.toasts.visible_messages(), vec!["Added to cart ✅".to_string()]);
    assert!(p.dialogs.alerts().is_empty());

    p.scheduler.advance(Duration::from_millis(1999));
    assert_eq!(p.toasts.visible_count(), 1);
    p.scheduler.advance(Duration::from_millis(1));
    assert_eq!(p.toasts.visible_count(), 0);
    assert_eq!(p.toasts.mounted_total(), 1);
    assert_eq!(p.scheduler.pending_count(), 0);

    let request = &p.transport.requests()[0];
    assert_eq!(request.url, "/cart/add-ajax/65f1c2");
    assert!(request.body.is_none());
}

#[test]
fn test_network_failure_alerts_once_without_toast() {
    let p = page();
    p.transport
        .fail(FetchError::RequestError("TypeError: Failed to fetch".to_string()));

    block_on(p.page.dispatch(add("65f1c2"))).unwrap();

    assert_eq!(p.dialogs.alerts(), vec!["Error adding to cart".to_string()]);
    assert_eq!(p.toasts.mounted_total(), 0);
    assert_eq!(p.logs.messages_at(LogLevel::Warn), vec!["add-to-cart finished".to_string()]);
}

#[test]
fn test_rejected_add_is_silent_by_default() {
    let p = page();
    p.transport
        .respond(Response::json_body(404, &json!({"success": false})));

    block_on(p.page.dispatch(add("missing"))).unwrap();

    assert!(p.dialogs.alerts().is_empty());
    assert_eq!(p.toasts.mounted_total(), 0);
}

#[test]
fn test_rejected_add_can_toast() {
    let config = CartPageConfig::default()
        .merge_json_overrides(r#"{"feedback": {"rejected": "toast"}}"#)
        .unwrap();
    let p = page_with(config, FakeDialogs::accepting());
    p.transport
        .respond(Response::json_body(200, &json!({"success": 0})));

    block_on(p.page.dispatch(add("p1"))).unwrap();

    let mounted = p.toasts.mounted();
    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].kind, ToastKind::Error);
}

#[test]
fn test_add_with_quantity_sends_raw_value() {
    let p = page();
    p.qty.set_value("3");
    p.transport
        .respond(Response::json_body(200, &json!({"success": true})));

    let params = ActionParams::new(ADD_TO_CART_WITH_QTY).with(PARAM_PRODUCT_ID, "p7");
    block_on(p.page.dispatch(params)).unwrap();

    let request = &p.transport.requests()[0];
    assert_eq!(request.body_text(), Some(r#"{"qty":"3"}"#));
    assert_eq!(p.toasts.visible_count(), 1);
}

#[test]
fn test_add_with_quantity_failure_uses_same_contract() {
    let p = page();
    p.transport.fail(FetchError::RequestError("offline".to_string()));

    let params = ActionParams::new(ADD_TO_CART_WITH_QTY).with(PARAM_PRODUCT_ID, "p7");
    block_on(p.page.dispatch(params)).unwrap();

    assert_eq!(p.dialogs.alerts().len(), 1);
    assert_eq!(p.toasts.mounted_total(), 0);
}

#[test]
fn test_overlapping_adds_each_toast() {
    let p = page();
    p.transport
        .respond(Response::json_body(200, &json!({"success": true})))
        .respond(Response::json_body(200, &json!({"success": true})));

    let first = p.page.dispatch(add("a"));
    let second = p.page.dispatch(add("b"));
    block_on(async {
        let (a, b) = futures::join!(first, second);
        a.unwrap();
        b.unwrap();
    });

    assert_eq!(p.toasts.visible_count(), 2);
    p.scheduler.advance(Duration::from_millis(2000));
    assert_eq!(p.toasts.visible_count(), 0);
}

#[test]
fn test_add_without_product_id_fails() {
    let p = page();
    let err = block_on(p.page.dispatch(ActionParams::new(ADD_TO_CART))).unwrap_err();
    assert!(matches!(err, CartUiError::MissingParam { .. }));
    assert_eq!(p.transport.request_count(), 0);
}

// === Stepper and Mirror ===

#[test]
fn test_stepper_via_actions() {
    let p = page();
    block_on(p.page.dispatch(ActionParams::new(CHANGE_QTY).with(PARAM_DELTA, "-1"))).unwrap();
    assert_eq!(p.qty.value(), "1");

    p.qty.set_value("5");
    block_on(p.page.dispatch(ActionParams::new(CHANGE_QTY).with(PARAM_DELTA, "+1"))).unwrap();
    assert_eq!(p.qty.value(), "6");
}

#[test]
fn test_stepper_resets_unparseable_without_delta() {
    let p = page();
    p.qty.set_value("abc");
    block_on(p.page.dispatch(ActionParams::new(CHANGE_QTY).with(PARAM_DELTA, "1"))).unwrap();
    assert_eq!(p.qty.value(), "1");
}

#[test]
fn test_mirror_on_buy_now_submit() {
    let p = page();
    p.qty.set_value("7");
    p.page.on_buy_now_submit();
    assert_eq!(p.buy_qty.value(), "7");

    p.qty.set_value("9");
    block_on(p.page.dispatch(ActionParams::new(SYNC_QTY))).unwrap();
    assert_eq!(p.buy_qty.value(), "9");
}

#[test]
fn test_missing_fields_are_reported() {
    let page = CartPage::new(
        CartPageConfig::default(),
        CartPageDeps {
            transport: Rc::new(MockTransport::new()),
            dialogs: Rc::new(FakeDialogs::accepting()),
            toast_host: Rc::new(FakeToastHost::default()),
            scheduler: Rc::new(ManualScheduler::default()),
            log_sink: Rc::new(MemorySink::default()),
            quantity: None,
            buy_quantity: None,
        },
    )
    .unwrap();

    let err = block_on(page.dispatch(ActionParams::new(SYNC_QTY))).unwrap_err();
    assert_eq!(err, CartUiError::MissingElement("#qty".to_string()));

    // Logged, not propagated.
    block_on(page.run_action(ActionParams::new(CHANGE_QTY).with(PARAM_DELTA, "1")));
}

#[test]
fn test_unknown_action_logged_by_run_action() {
    let p = page();
    block_on(p.page.run_action(ActionParams::new("wishlist")));
    assert_eq!(p.logs.messages_at(LogLevel::Warn), vec!["action failed".to_string()]);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = CartPageConfig::default();
    config.endpoints.add_to_cart = "/cart/add".to_string();
    let result = CartPage::new(
        config,
        CartPageDeps {
            transport: Rc::new(MockTransport::new()),
            dialogs: Rc::new(FakeDialogs::accepting()),
            toast_host: Rc::new(FakeToastHost::default()),
            scheduler: Rc::new(ManualScheduler::default()),
            log_sink: Rc::new(MemorySink::default()),
            quantity: None,
            buy_quantity: None,
        },
    );
    assert!(matches!(result, Err(CartUiError::InvalidConfig(_))));
}

#[test]
fn test_skipped_element_logged() {
    let p = page();
    p.page.on_wiring_error(&CartUiError::WrongElementType {
        selector: ".cart-qty".to_string(),
        expected: "input".to_string(),
    });

    let entries = p.logs.entries();
    let skipped = entries
        .iter()
        .find(|e| e.message == "element skipped")
        .unwrap();
    assert_eq!(skipped.level, LogLevel::Warn);
    assert_eq!(
        skipped.fields.get("error"),
        Some(&json!("Element .cart-qty is not of type input"))
    );
}

#[test]
fn test_failed_alert_does_not_break_add() {
    let p = page_with(
        CartPageConfig::default(),
        FakeDialogs::accepting().with_failing_alerts("alert blocked"),
    );
    p.transport
        .fail(FetchError::RequestError("TypeError: Failed to fetch".to_string()));

    block_on(p.page.dispatch(add("65f1c2"))).unwrap();

    assert_eq!(p.dialogs.alerts(), vec!["Error adding to cart".to_string()]);
    assert!(p.logs.messages_at(LogLevel::Warn).contains(&"alert failed".to_string()));
}
