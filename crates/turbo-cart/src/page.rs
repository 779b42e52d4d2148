//! Composition root for the cart page.
//!
//! [`CartPage`] assembles the client, notifier and actions from a
//! configuration and a set of collaborators, then exposes one method per
//! page event. The workload only translates DOM events into these calls.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use turbo_data::{FetchClient, Transport};
use turbo_observability::{LogSink, StructuredLogger};

use crate::actions::{ActionFuture, ActionParams, ActionRegistry, CartActions};
use crate::client::CartClient;
use crate::config::CartPageConfig;
use crate::dom::{Dialogs, QuantityField, Scheduler, ToastHost};
use crate::error::CartUiError;
use crate::guard::{clamp_quantity_field, confirm_removal, GuardResult, RemovalDecision};
use crate::notify::Notifier;
use crate::toast::ToastNotifier;

/// Everything the cart page needs from its environment.
pub struct CartPageDeps {
    pub transport: Rc<dyn Transport>,
    pub dialogs: Rc<dyn Dialogs>,
    pub toast_host: Rc<dyn ToastHost>,
    pub scheduler: Rc<dyn Scheduler>,
    pub log_sink: Rc<dyn LogSink>,
    /// Product-page quantity input, when present.
    pub quantity: Option<Rc<dyn QuantityField>>,
    /// Buy-now quantity input, when present.
    pub buy_quantity: Option<Rc<dyn QuantityField>>,
}

/// The wired cart page.
pub struct CartPage {
    config: CartPageConfig,
    dialogs: Rc<dyn Dialogs>,
    actions: Rc<CartActions>,
    registry: ActionRegistry,
    logger: StructuredLogger,
}

impl CartPage {
    /// Validate `config` and wire every component.
    pub fn new(config: CartPageConfig, deps: CartPageDeps) -> Result<Self, CartUiError> {
        config.validate()?;

        let logger = StructuredLogger::new()
            .with_component(config.logging.component.clone())
            .with_min_level(config.logging.level)
            .with_format(config.logging.format)
            .with_sink(deps.log_sink);

        let client = CartClient::new(
            FetchClient::new(deps.transport),
            config.endpoints.add_to_cart.clone(),
        );
        let toasts = ToastNotifier::new(deps.toast_host, deps.scheduler, logger.clone());
        let notifier = Notifier::new(
            toasts,
            Rc::clone(&deps.dialogs),
            config.feedback,
            config.toast.clone(),
            logger.clone(),
        );

        let mut actions = CartActions::new(client, notifier, config.messages.clone(), logger.clone());
        if let Some(field) = deps.quantity {
            actions = actions.with_quantity_field(config.selectors.quantity_id.clone(), field);
        }
        if let Some(field) = deps.buy_quantity {
            actions =
                actions.with_buy_quantity_field(config.selectors.buy_quantity_id.clone(), field);
        }
        let actions = Rc::new(actions);
        let registry = Rc::clone(&actions).into_registry();

        logger
            .debug_builder("cart page wired")
            .field("actions", registry.names().join(","))
            .emit();

        Ok(Self {
            config,
            dialogs: deps.dialogs,
            actions,
            registry,
            logger,
        })
    }

    pub fn config(&self) -> &CartPageConfig {
        &self.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn actions(&self) -> &Rc<CartActions> {
        &self.actions
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// A cart-line quantity input changed.
    pub fn on_quantity_change(&self, field: &dyn QuantityField) -> GuardResult {
        let result = clamp_quantity_field(field);
        if let GuardResult::Corrected { from } = &result {
            self.logger
                .debug_builder("quantity corrected")
                .field("from", from.as_str())
                .emit();
        }
        result
    }

    /// A remove control was clicked.
    pub fn on_remove_click(&self) -> RemovalDecision {
        let decision = confirm_removal(self.dialogs.as_ref(), &self.config.messages.confirm_remove);
        if decision == RemovalDecision::Cancel {
            self.logger.info("removal cancelled");
        }
        decision
    }

    /// The buy-now form is about to submit.
    pub fn on_buy_now_submit(&self) {
        if let Err(e) = self.actions.sync_quantity() {
            self.logger
                .warn_builder("buy-now quantity not mirrored")
                .field("error", e.to_string())
                .emit();
        }
    }

    /// An element was skipped while attaching listeners.
    pub fn on_wiring_error(&self, error: &CartUiError) {
        self.logger
            .warn_builder("element skipped")
            .field("error", error.to_string())
            .emit();
    }

    /// Dispatch an action by name.
    pub fn dispatch(&self, params: ActionParams) -> ActionFuture {
        self.registry.dispatch(params)
    }

    /// Dispatch an action, logging instead of returning its error.
    pub fn run_action(&self, params: ActionParams) -> LocalBoxFuture<'static, ()> {
        let action = params.action().to_string();
        let pending = self.dispatch(params);
        let logger = self.logger.clone();
        async move {
            if let Err(e) = pending.await {
                logger
                    .warn_builder("action failed")
                    .field("action", action)
                    .field("error", e.to_string())
                    .emit();
            }
        }
        .boxed_local()
    }
}
