//! Cart page configuration.
//!
//! The workload embeds a TOML file with the defaults and lets the page
//! override any subset of it with a JSON document.

use serde::{Deserialize, Serialize};
use turbo_observability::{LogFormat, LogLevel};

use crate::error::CartUiError;
use crate::notify::FeedbackChannel;
use crate::toast::{ERROR_TOAST_CLASS, SUCCESS_TOAST_CLASS};

/// Placeholder substituted with the product ID in endpoint templates.
pub const PRODUCT_ID_PLACEHOLDER: &str = "{product_id}";

/// Full cart page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartPageConfig {
    /// Server endpoints.
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// How page elements are located.
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// User-facing text.
    #[serde(default)]
    pub messages: MessageConfig,

    /// Toast appearance and lifetime.
    #[serde(default)]
    pub toast: ToastConfig,

    /// Where failure notices go.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CartPageConfig {
    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CartUiError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, CartUiError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay a partial JSON document on this configuration.
    ///
    /// Objects merge key by key; any other value replaces what was there.
    pub fn merge_json_overrides(&self, overrides: &str) -> Result<Self, CartUiError> {
        let overlay: serde_json::Value = serde_json::from_str(overrides)?;
        if !overlay.is_object() {
            return Err(CartUiError::InvalidConfig(
                "overrides must be a JSON object".to_string(),
            ));
        }

        let mut base = serde_json::to_value(self)?;
        merge_values(&mut base, overlay);

        let merged: Self = serde_json::from_value(base)
            .map_err(|e| CartUiError::InvalidConfig(e.to_string()))?;
        merged.validate()?;
        Ok(merged)
    }

    /// Reject configurations the page cannot run with.
    pub fn validate(&self) -> Result<(), CartUiError> {
        if !self.endpoints.add_to_cart.contains(PRODUCT_ID_PLACEHOLDER) {
            return Err(CartUiError::InvalidConfig(format!(
                "endpoints.add_to_cart must contain {}",
                PRODUCT_ID_PLACEHOLDER
            )));
        }

        if self.toast.duration_ms == 0 {
            return Err(CartUiError::InvalidConfig(
                "toast.duration_ms must be positive".to_string(),
            ));
        }

        let selectors = [
            ("quantity_class", &self.selectors.quantity_class),
            ("remove_class", &self.selectors.remove_class),
            ("quantity_id", &self.selectors.quantity_id),
            ("buy_quantity_id", &self.selectors.buy_quantity_id),
            ("buy_form_id", &self.selectors.buy_form_id),
            ("action_attribute", &self.selectors.action_attribute),
            ("config_element_id", &self.selectors.config_element_id),
        ];
        if let Some((name, _)) = selectors.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CartUiError::InvalidConfig(format!(
                "selectors.{} must not be empty",
                name
            )));
        }

        Ok(())
    }
}

fn merge_values(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Server endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Add-to-cart endpoint; `{product_id}` is replaced per request.
    #[serde(default = "default_add_to_cart")]
    pub add_to_cart: String,
}

fn default_add_to_cart() -> String {
    "/cart/add-ajax/{product_id}".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            add_to_cart: default_add_to_cart(),
        }
    }
}

/// Class names, IDs and attributes the page markup uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Class of cart-line quantity inputs.
    pub quantity_class: String,
    /// Class of remove controls.
    pub remove_class: String,
    /// ID of the product-page quantity input.
    pub quantity_id: String,
    /// ID of the buy-now quantity input.
    pub buy_quantity_id: String,
    /// ID of the buy-now form.
    pub buy_form_id: String,
    /// Attribute naming the action an element triggers.
    pub action_attribute: String,
    /// ID of the `<script type="application/json">` holding overrides.
    pub config_element_id: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quantity_class: "cart-qty".to_string(),
            remove_class: "remove-item".to_string(),
            quantity_id: "qty".to_string(),
            buy_quantity_id: "buyQty".to_string(),
            buy_form_id: "buyNowForm".to_string(),
            action_attribute: "data-cart-action".to_string(),
            config_element_id: "cart-page-config".to_string(),
        }
    }
}

/// User-facing text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub added: String,
    pub add_failed: String,
    pub add_rejected: String,
    pub confirm_remove: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            added: "Added to cart ✅".to_string(),
            add_failed: "Error adding to cart".to_string(),
            add_rejected: "Could not add this item to your cart".to_string(),
            confirm_remove: "Remove this item from cart?".to_string(),
        }
    }
}

/// Toast appearance and lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
    pub success_class: String,
    pub error_class: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            success_class: SUCCESS_TOAST_CLASS.to_string(),
            error_class: ERROR_TOAST_CLASS.to_string(),
        }
    }
}

/// Channel per failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Transport failure or unreadable response.
    pub network_failure: FeedbackChannel,
    /// Well-formed response without a truthy `success`.
    pub rejected: FeedbackChannel,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            network_failure: FeedbackChannel::Alert,
            rejected: FeedbackChannel::Silent,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub component: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            component: "cart-page".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CartPageConfig::default();
        config.validate().unwrap();
        assert_eq!(config.endpoints.add_to_cart, "/cart/add-ajax/{product_id}");
        assert_eq!(config.toast.duration_ms, 2000);
        assert_eq!(config.feedback.network_failure, FeedbackChannel::Alert);
        assert_eq!(config.feedback.rejected, FeedbackChannel::Silent);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = CartPageConfig::from_toml_str("").unwrap();
        assert_eq!(config, CartPageConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = CartPageConfig::from_toml_str(
            r#"
            [feedback]
            rejected = "toast"

            [logging]
            level = "debug"
            format = "human"
            "#,
        )
        .unwrap();
        assert_eq!(config.feedback.rejected, FeedbackChannel::Toast);
        assert_eq!(config.feedback.network_failure, FeedbackChannel::Alert);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_json_overrides_merge_deeply() {
        let base = CartPageConfig::default();
        let merged = base
            .merge_json_overrides(
                r#"{"endpoints": {"add_to_cart": "/shop/cart/add-ajax/{product_id}"},
                    "messages": {"added": "In your bag"}}"#,
            )
            .unwrap();

        assert_eq!(merged.endpoints.add_to_cart, "/shop/cart/add-ajax/{product_id}");
        assert_eq!(merged.messages.added, "In your bag");
        assert_eq!(merged.messages.add_failed, base.messages.add_failed);
        assert_eq!(merged.selectors, base.selectors);
    }

    // === Validation Tests ===

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = CartPageConfig::default()
            .merge_json_overrides(r#"{"endpoints": {"add_to_cart": "/cart/add"}}"#)
            .unwrap_err();
        assert!(matches!(err, CartUiError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_duration() {
        assert!(CartPageConfig::from_json_str(r#"{"toast": {"duration_ms": 0}}"#).is_err());
    }

    #[test]
    fn test_rejects_empty_selector() {
        assert!(CartPageConfig::from_toml_str("[selectors]\nquantity_id = \"\"").is_err());
    }

    #[test]
    fn test_rejects_non_object_overrides() {
        assert!(CartPageConfig::default().merge_json_overrides("[1, 2]").is_err());
        assert!(CartPageConfig::default().merge_json_overrides("not json").is_err());
    }

    #[test]
    fn test_rejects_unknown_channel() {
        assert!(CartPageConfig::from_json_str(r#"{"feedback": {"rejected": "email"}}"#).is_err());
    }
}
