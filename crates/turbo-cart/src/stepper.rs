//! Quantity stepper and the buy-now quantity mirror.

use crate::dom::QuantityField;
use crate::quantity::{parse_leading_int, Quantity};

/// Add `delta` to the field's value and write the clamped result back.
///
/// An unparseable value resets the field to 1; the delta is not applied.
pub fn step_quantity(field: &dyn QuantityField, delta: i64) -> Quantity {
    let next = match parse_leading_int(&field.value()) {
        Some(current) => Quantity::new(current.saturating_add(delta)),
        None => Quantity::MIN,
    };
    field.set_value(&next.to_string());
    next
}

/// Copy the quantity field's raw value into the buy-now field.
pub fn mirror_quantity(source: &dyn QuantityField, target: &dyn QuantityField) {
    target.set_value(&source.value());
}
