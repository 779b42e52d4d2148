//! Loading the page configuration.

use anyhow::{Context, Result};
use turbo_cart::CartPageConfig;

/// Defaults compiled into the workload.
pub const EMBEDDED_CONFIG: &str = include_str!("../cart-page.toml");

/// Parse the embedded defaults.
pub fn embedded() -> Result<CartPageConfig> {
    CartPageConfig::from_toml_str(EMBEDDED_CONFIG).context("embedded cart-page.toml is invalid")
}

/// Apply the page's JSON overrides, if any, on top of `base`.
///
/// Blank override documents are ignored.
pub fn with_overrides(base: CartPageConfig, overrides: Option<&str>) -> Result<CartPageConfig> {
    match overrides.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => base
            .merge_json_overrides(json)
            .context("page configuration overrides are invalid"),
        None => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_cart::FeedbackChannel;

    #[test]
    fn test_embedded_matches_builtin_defaults() {
        assert_eq!(embedded().unwrap(), CartPageConfig::default());
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let base = embedded().unwrap();
        assert_eq!(with_overrides(base.clone(), None).unwrap(), base);
        assert_eq!(with_overrides(base.clone(), Some("  \n ")).unwrap(), base);
    }

    #[test]
    fn test_overrides_applied() {
        let config = with_overrides(
            embedded().unwrap(),
            Some(r#"{"feedback": {"network_failure": "toast"}}"#),
        )
        .unwrap();
        assert_eq!(config.feedback.network_failure, FeedbackChannel::Toast);
    }

    #[test]
    fn test_bad_overrides_carry_context() {
        let err = with_overrides(embedded().unwrap(), Some("{")).unwrap_err();
        assert!(format!("{:#}", err).starts_with("page configuration overrides are invalid"));
    }
}
