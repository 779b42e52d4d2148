//! Turning an action trigger's attributes into [`ActionParams`].

use turbo_cart::ActionParams;

const DATA_PREFIX: &str = "data-";

/// Collect `data-*` attributes (other than the action attribute itself)
/// as parameters, with the prefix stripped: `data-product-id="42"` becomes
/// `product-id = "42"`.
pub fn params_from_attributes<'a, I>(action: &str, action_attribute: &str, attributes: I) -> ActionParams
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case(action_attribute))
        .filter_map(|(name, value)| {
            let lower = name.to_ascii_lowercase();
            lower
                .strip_prefix(DATA_PREFIX)
                .filter(|key| !key.is_empty())
                .map(|key| (key.to_string(), value))
        })
        .fold(ActionParams::new(action), |params, (key, value)| {
            params.with(key, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_cart::prelude::*;

    #[test]
    fn test_collects_data_attributes() {
        let params = params_from_attributes(
            ADD_TO_CART,
            "data-cart-action",
            [
                ("class", "btn"),
                ("data-cart-action", ADD_TO_CART),
                ("data-product-id", "65f1c2"),
                ("DATA-SOURCE", "pdp"),
            ],
        );

        assert_eq!(params.action(), ADD_TO_CART);
        assert_eq!(params.get(PARAM_PRODUCT_ID), Some("65f1c2"));
        assert_eq!(params.get("source"), Some("pdp"));
        assert_eq!(params.get("class"), None);
        assert_eq!(params.get("cart-action"), None);
    }

    #[test]
    fn test_delta_attribute() {
        let params = params_from_attributes(
            CHANGE_QTY,
            "data-cart-action",
            [("data-delta", "-1"), ("data-", "ignored")],
        );
        assert_eq!(params.delta().unwrap(), -1);
    }
}
