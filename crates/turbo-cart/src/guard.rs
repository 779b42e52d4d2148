//! Input guards: quantity clamping and removal confirmation.

use crate::dom::{Dialogs, QuantityField};
use crate::quantity::{parse_numeric, Quantity};

/// What the input guard did to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResult {
    /// Value was numeric and at least the minimum.
    Unchanged,
    /// Value was replaced with the minimum.
    Corrected { from: String },
}

/// Clamp a quantity field after the user changed it.
///
/// Numeric values below 1 and non-numeric values are replaced with `"1"`.
/// "Numeric" follows [`parse_numeric`], the browser's `Number(...)` grammar.
/// Anything else is left exactly as typed; there is no upper bound.
pub fn clamp_quantity_field(field: &dyn QuantityField) -> GuardResult {
    let raw = field.value();
    match parse_numeric(&raw) {
        Some(v) if v >= Quantity::MIN.get() as f64 => GuardResult::Unchanged,
        _ => {
            field.set_value(&Quantity::MIN.to_string());
            GuardResult::Corrected { from: raw }
        }
    }
}

/// Whether a remove control's default action may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalDecision {
    Proceed,
    Cancel,
}

impl RemovalDecision {
    /// Whether the caller must cancel the event's default action.
    pub fn should_prevent_default(self) -> bool {
        self == RemovalDecision::Cancel
    }
}

/// Ask the user to confirm removing a cart line.
pub fn confirm_removal(dialogs: &dyn Dialogs, prompt: &str) -> RemovalDecision {
    if dialogs.confirm(prompt) {
        RemovalDecision::Proceed
    } else {
        RemovalDecision::Cancel
    }
}
