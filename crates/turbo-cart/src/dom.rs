//! Collaborator traits for everything the cart page touches outside itself.
//!
//! Components receive these as handles instead of querying global page
//! state. The `cart-page` workload implements them over `web-sys`; the
//! [`testing`](crate::testing) module implements them in memory.

use std::time::Duration;

use crate::error::CartUiError;
use crate::toast::Toast;

/// A text input holding a quantity.
pub trait QuantityField {
    /// Current raw value.
    fn value(&self) -> String;

    /// Replace the value.
    fn set_value(&self, value: &str);
}

/// Blocking user prompts.
pub trait Dialogs {
    /// Ask a yes/no question; `true` means the user accepted.
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user must dismiss.
    fn alert(&self, message: &str) -> Result<(), CartUiError>;
}

/// A toast that is currently on the page.
pub trait MountedToast {
    /// Detach the toast from the page.
    fn remove(self: Box<Self>);
}

/// Where toasts are rendered.
pub trait ToastHost {
    /// Render `toast` and return a handle that removes it.
    fn mount(&self, toast: &Toast) -> Result<Box<dyn MountedToast>, CartUiError>;
}

/// One-shot delayed tasks on the page's event loop.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), CartUiError>;
}
