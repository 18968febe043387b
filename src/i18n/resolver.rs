// SPDX-License-Identifier: MPL-2.0
//! Request-side locale resolution.
//!
//! The parameter bag is awaited first; everything after that is a pure
//! function of the bag and the [`LocaleConfig`]. Invalid or missing
//! selectors fall back to the default locale without any diagnostics, so a
//! bare URL is always a valid, bookmarkable page.

use super::locale::{Locale, LocaleConfig};
use super::params::QueryParams;
use std::future::IntoFuture;

/// Query key that selects a non-default locale.
pub const SELECTOR_PARAM: &str = "lang";

/// Resolves the effective locale of a server-rendered request.
///
/// `params` is anything that eventually yields the request's query
/// parameters: a future, an async block, or `std::future::ready(bag)`.
pub async fn resolve_locale<P>(config: &LocaleConfig, params: P) -> Locale
where
    P: IntoFuture<Output = QueryParams>,
{
    let params = params.await;
    locale_from_params(config, &params)
}

/// Synchronous core of [`resolve_locale`].
///
/// A selector given more than once counts as invalid.
#[must_use]
pub fn locale_from_params(config: &LocaleConfig, params: &QueryParams) -> Locale {
    params
        .single(SELECTOR_PARAM)
        .and_then(|tag| config.parse(tag))
        .unwrap_or_else(|| config.default_locale())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    fn bag(query: &str) -> QueryParams {
        QueryParams::parse(query)
    }

    #[tokio::test]
    async fn supported_selector_is_returned() {
        let config = LocaleConfig::standard();
        assert_eq!(resolve_locale(&config, ready(bag("lang=en"))).await, Locale::En);
        assert_eq!(resolve_locale(&config, ready(bag("lang=zh"))).await, Locale::Zh);
    }

    #[tokio::test]
    async fn missing_selector_falls_back_to_default() {
        let config = LocaleConfig::standard();
        assert_eq!(resolve_locale(&config, ready(QueryParams::new())).await, Locale::Zh);
        assert_eq!(resolve_locale(&config, ready(bag("page=2"))).await, Locale::Zh);
    }

    #[tokio::test]
    async fn unsupported_or_malformed_selector_falls_back_to_default() {
        let config = LocaleConfig::standard();
        for query in ["lang=fr", "lang=", "lang=EN", "lang=en-US", "lang=%20en"] {
            assert_eq!(
                resolve_locale(&config, ready(bag(query))).await,
                Locale::Zh,
                "query {query:?}"
            );
        }
    }

    #[tokio::test]
    async fn repeated_selector_falls_back_to_default() {
        let config = LocaleConfig::standard();
        let locale = resolve_locale(&config, ready(bag("lang=en&lang=en"))).await;
        assert_eq!(locale, Locale::Zh);
    }

    #[tokio::test]
    async fn deferred_bag_is_awaited() {
        let config = LocaleConfig::standard();
        let deferred = async {
            tokio::task::yield_now().await;
            bag("lang=en")
        };
        assert_eq!(resolve_locale(&config, deferred).await, Locale::En);
    }

    #[test]
    fn locale_outside_custom_config_is_ignored() {
        let config = LocaleConfig::new([Locale::En], Locale::En);
        assert_eq!(locale_from_params(&config, &bag("lang=zh")), Locale::En);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let config = LocaleConfig::standard();
        for query in ["", "lang=en", "lang=fr", "lang=zh&x=1"] {
            let params = bag(query);
            assert_eq!(
                locale_from_params(&config, &params),
                locale_from_params(&config, &params)
            );
        }
    }
}
