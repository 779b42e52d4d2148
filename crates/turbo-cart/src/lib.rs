//! Cart page interactions for TurboCommerce.
//!
//! This crate holds the behaviour behind the server-rendered cart and
//! product pages, independent of the browser:
//!
//! - **Guards**: clamp quantity inputs to at least 1, confirm line removal
//! - **Actions**: add-to-cart (with and without quantity), quantity stepper,
//!   buy-now quantity mirror, dispatched by name through [`ActionRegistry`]
//! - **Feedback**: one [`Notifier`] turning outcomes into toasts or alerts
//!
//! Every browser dependency is a trait in [`dom`] or
//! [`turbo_data::Transport`]; the `cart-page` workload supplies the
//! `web-sys` implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_cart::prelude::*;
//!
//! let page = CartPage::new(CartPageConfig::default(), deps)?;
//!
//! // input `change` on a `.cart-qty` field
//! page.on_quantity_change(&field);
//!
//! // click on `[data-cart-action="add-to-cart"][data-product-id="42"]`
//! let params = ActionParams::new("add-to-cart").with("product-id", "42");
//! spawn_local(page.run_action(params));
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod dom;
pub mod error;
pub mod guard;
pub mod ids;
pub mod notify;
pub mod outcome;
pub mod page;
pub mod quantity;
pub mod stepper;
pub mod testing;
pub mod toast;

pub use actions::{ActionParams, ActionRegistry, CartActions};
pub use config::CartPageConfig;
pub use error::CartUiError;
pub use ids::ProductId;
pub use notify::{FeedbackChannel, Notice, Notifier};
pub use outcome::AddOutcome;
pub use page::{CartPage, CartPageDeps};
pub use quantity::Quantity;
pub use toast::{Toast, ToastKind, ToastNotifier};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::actions::{
        ActionParams, ActionRegistry, CartActions, ADD_TO_CART, ADD_TO_CART_WITH_QTY, CHANGE_QTY,
        PARAM_DELTA, PARAM_PRODUCT_ID, SYNC_QTY,
    };
    pub use crate::config::CartPageConfig;
    pub use crate::dom::{Dialogs, MountedToast, QuantityField, Scheduler, ToastHost};
    pub use crate::error::CartUiError;
    pub use crate::guard::{GuardResult, RemovalDecision};
    pub use crate::ids::ProductId;
    pub use crate::outcome::AddOutcome;
    pub use crate::page::{CartPage, CartPageDeps};
    pub use crate::quantity::Quantity;
    pub use crate::toast::{Toast, ToastKind};
}
