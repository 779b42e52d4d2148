//! Cart actions and the registry that dispatches them by name.
//!
//! Markup names an action (`data-cart-action="add-to-cart"`) plus its
//! parameters as data attributes; the workload collects those into
//! [`ActionParams`] and calls [`ActionRegistry::dispatch`].

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use turbo_observability::{InteractionId, StructuredLogger};

use crate::client::CartClient;
use crate::config::MessageConfig;
use crate::dom::QuantityField;
use crate::error::CartUiError;
use crate::ids::ProductId;
use crate::notify::{Notice, Notifier};
use crate::outcome::AddOutcome;
use crate::quantity::Quantity;
use crate::stepper::{mirror_quantity, step_quantity};

/// Add a product with no quantity.
pub const ADD_TO_CART: &str = "add-to-cart";
/// Add a product with the quantity field's value.
pub const ADD_TO_CART_WITH_QTY: &str = "add-to-cart-with-qty";
/// Step the quantity field by `delta`.
pub const CHANGE_QTY: &str = "change-qty";
/// Copy the quantity field into the buy-now field.
pub const SYNC_QTY: &str = "sync-qty";

/// Parameter holding the product ID.
pub const PARAM_PRODUCT_ID: &str = "product-id";
/// Parameter holding the stepper delta.
pub const PARAM_DELTA: &str = "delta";

/// Whether a trigger's own default action must be cancelled.
///
/// Stepper and mirror triggers often sit inside the buy-now form; a plain
/// `<button>` there would otherwise submit it on every click.
pub fn cancels_default(action: &str) -> bool {
    matches!(action, CHANGE_QTY | SYNC_QTY)
}

/// Future returned by every action handler.
pub type ActionFuture = LocalBoxFuture<'static, Result<(), CartUiError>>;

/// A registered action handler.
pub type ActionHandler = Rc<dyn Fn(ActionParams) -> ActionFuture>;

/// Named parameters passed to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionParams {
    action: String,
    values: HashMap<String, String>,
}

impl ActionParams {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            values: HashMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Action these parameters were collected for.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a parameter or fail naming the action.
    pub fn require(&self, key: &str) -> Result<&str, CartUiError> {
        self.get(key).ok_or_else(|| CartUiError::MissingParam {
            action: self.action.clone(),
            param: key.to_string(),
        })
    }

    /// The `product-id` parameter.
    pub fn product_id(&self) -> Result<ProductId, CartUiError> {
        ProductId::new(self.require(PARAM_PRODUCT_ID)?)
    }

    /// The `delta` parameter as a signed integer.
    pub fn delta(&self) -> Result<i64, CartUiError> {
        let raw = self.require(PARAM_DELTA)?;
        raw.trim().parse().map_err(|_| CartUiError::InvalidParam {
            param: PARAM_DELTA.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Maps action names to handlers.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    handlers: BTreeMap<String, ActionHandler>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(ActionParams) -> ActionFuture + 'static,
    {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Run the handler registered under `params.action()`.
    pub fn dispatch(&self, params: ActionParams) -> ActionFuture {
        match self.handlers.get(params.action()) {
            Some(handler) => handler(params),
            None => future::ready(Err(CartUiError::UnknownAction(params.action().to_string())))
                .boxed_local(),
        }
    }
}

/// The cart page's user-triggered operations.
pub struct CartActions {
    client: CartClient,
    notifier: Notifier,
    messages: MessageConfig,
    quantity: Option<Rc<dyn QuantityField>>,
    buy_quantity: Option<Rc<dyn QuantityField>>,
    quantity_id: String,
    buy_quantity_id: String,
    logger: StructuredLogger,
}

impl CartActions {
    pub fn new(
        client: CartClient,
        notifier: Notifier,
        messages: MessageConfig,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            client,
            notifier,
            messages,
            quantity: None,
            buy_quantity: None,
            quantity_id: "qty".to_string(),
            buy_quantity_id: "buyQty".to_string(),
            logger,
        }
    }

    /// Attach the product-page quantity field.
    pub fn with_quantity_field(mut self, id: impl Into<String>, field: Rc<dyn QuantityField>) -> Self {
        self.quantity_id = id.into();
        self.quantity = Some(field);
        self
    }

    /// Attach the buy-now quantity field.
    pub fn with_buy_quantity_field(
        mut self,
        id: impl Into<String>,
        field: Rc<dyn QuantityField>,
    ) -> Self {
        self.buy_quantity_id = id.into();
        self.buy_quantity = Some(field);
        self
    }

    fn quantity_field(&self) -> Result<&Rc<dyn QuantityField>, CartUiError> {
        self.quantity
            .as_ref()
            .ok_or_else(|| CartUiError::MissingElement(format!("#{}", self.quantity_id)))
    }

    fn buy_quantity_field(&self) -> Result<&Rc<dyn QuantityField>, CartUiError> {
        self.buy_quantity
            .as_ref()
            .ok_or_else(|| CartUiError::MissingElement(format!("#{}", self.buy_quantity_id)))
    }

    /// Add a product without a quantity and report the outcome.
    pub async fn add_to_cart(&self, product_id: &ProductId) -> AddOutcome {
        let logger = self.start(ADD_TO_CART, product_id);
        let outcome = self.client.add(product_id).await;
        self.finish(&logger, product_id, &outcome);
        outcome
    }

    /// Add a product with the quantity field's raw value and report the outcome.
    pub async fn add_to_cart_with_quantity(
        &self,
        product_id: &ProductId,
    ) -> Result<AddOutcome, CartUiError> {
        let raw_qty = self.quantity_field()?.value();
        let logger = self.start(ADD_TO_CART_WITH_QTY, product_id);
        let outcome = self.client.add_with_quantity(product_id, &raw_qty).await;
        self.finish(&logger, product_id, &outcome);
        Ok(outcome)
    }

    /// Step the quantity field by `delta`.
    pub fn change_quantity(&self, delta: i64) -> Result<Quantity, CartUiError> {
        let next = step_quantity(self.quantity_field()?.as_ref(), delta);
        self.logger
            .debug_builder("quantity stepped")
            .field_i64("delta", delta)
            .field_i64("quantity", next.get())
            .emit();
        Ok(next)
    }

    /// Copy the quantity field into the buy-now field.
    pub fn sync_quantity(&self) -> Result<(), CartUiError> {
        mirror_quantity(
            self.quantity_field()?.as_ref(),
            self.buy_quantity_field()?.as_ref(),
        );
        Ok(())
    }

    fn start(&self, action: &str, product_id: &ProductId) -> StructuredLogger {
        let logger = self.logger.for_interaction(InteractionId::generate());
        logger
            .debug_builder("add-to-cart started")
            .field("action", action)
            .field("product_id", product_id.as_str())
            .emit();
        logger
    }

    fn finish(&self, logger: &StructuredLogger, product_id: &ProductId, outcome: &AddOutcome) {
        let mut entry = match outcome {
            AddOutcome::Failed(e) => logger
                .warn_builder("add-to-cart finished")
                .field("error", e.to_string()),
            _ => logger.info_builder("add-to-cart finished"),
        };
        entry = entry
            .field("product_id", product_id.as_str())
            .field("outcome", outcome.label());
        if let Some(status) = outcome.status() {
            entry = entry.field_i64("status", i64::from(status));
        }
        entry.emit();

        let notice = match outcome {
            AddOutcome::Added { .. } => Notice::Success(self.messages.added.clone()),
            AddOutcome::Rejected { .. } => Notice::Rejected(self.messages.add_rejected.clone()),
            AddOutcome::Failed(_) => Notice::Failure(self.messages.add_failed.clone()),
        };
        self.notifier.notify(notice);
    }

    /// Build a registry exposing every cart action.
    pub fn into_registry(self: Rc<Self>) -> ActionRegistry {
        let mut registry = ActionRegistry::new();

        let actions = Rc::clone(&self);
        registry.register(ADD_TO_CART, move |params: ActionParams| {
            let actions = Rc::clone(&actions);
            async move {
                let id = params.product_id()?;
                actions.add_to_cart(&id).await;
                Ok::<(), CartUiError>(())
            }
            .boxed_local()
        });

        let actions = Rc::clone(&self);
        registry.register(ADD_TO_CART_WITH_QTY, move |params: ActionParams| {
            let actions = Rc::clone(&actions);
            async move {
                let id = params.product_id()?;
                actions.add_to_cart_with_quantity(&id).await?;
                Ok::<(), CartUiError>(())
            }
            .boxed_local()
        });

        let actions = Rc::clone(&self);
        registry.register(CHANGE_QTY, move |params: ActionParams| {
            let result = params
                .delta()
                .and_then(|delta| actions.change_quantity(delta))
                .map(|_| ());
            future::ready(result).boxed_local()
        });

        let actions = self;
        registry.register(SYNC_QTY, move |_params: ActionParams| {
            future::ready(actions.sync_quantity()).boxed_local()
        });

        registry
    }
}
