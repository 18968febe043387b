// SPDX-License-Identifier: MPL-2.0
//! Locale tracking for interactive navigation.
//!
//! A [`Navigation`] owns the current query state. Each [`LiveLocale`]
//! subscribed to it can read the effective locale synchronously at any time
//! and is woken whenever navigation changes the query, at which point the
//! locale is recomputed with the same precedence rule as the request-side
//! resolver.
//!
//! ```
//! use portfolio_site::i18n::{Locale, LocaleConfig, Navigation};
//! use std::sync::Arc;
//!
//! let navigation = Navigation::new("/");
//! let live = navigation.subscribe(Arc::new(LocaleConfig::standard()));
//! assert_eq!(live.current(), Locale::Zh);
//!
//! navigation.navigate_to("/?lang=en");
//! assert_eq!(live.current(), Locale::En);
//! ```

use super::locale::{Locale, LocaleConfig};
use super::params::QueryParams;
use super::resolver::SELECTOR_PARAM;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Computes the locale from live navigation state.
///
/// Unlike the request-side resolver, a repeated selector is not rejected:
/// the first value wins, which is how browsers read search params.
#[must_use]
pub fn client_locale(config: &LocaleConfig, params: &QueryParams) -> Locale {
    params
        .first(SELECTOR_PARAM)
        .and_then(|tag| config.parse(tag))
        .unwrap_or_else(|| config.default_locale())
}

/// Publisher of the current navigation query.
#[derive(Debug)]
pub struct Navigation {
    state: watch::Sender<QueryParams>,
}

impl Navigation {
    /// Starts tracking navigation at `url`.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self::with_params(QueryParams::from_url(url))
    }

    #[must_use]
    pub fn with_params(params: QueryParams) -> Self {
        let (state, _) = watch::channel(params);
        Self { state }
    }

    /// Moves to `url`. Subscribers are notified only if the query changed.
    pub fn navigate_to(&self, url: &str) {
        self.navigate(QueryParams::from_url(url));
    }

    pub fn navigate(&self, params: QueryParams) {
        self.state.send_if_modified(|current| {
            if *current == params {
                false
            } else {
                *current = params;
                true
            }
        });
    }

    #[must_use]
    pub fn current(&self) -> QueryParams {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, config: Arc<LocaleConfig>) -> LiveLocale {
        LiveLocale {
            config,
            state: self.state.subscribe(),
        }
    }
}

/// A subscriber that keeps the effective locale in step with navigation.
#[derive(Debug, Clone)]
pub struct LiveLocale {
    config: Arc<LocaleConfig>,
    state: watch::Receiver<QueryParams>,
}

impl LiveLocale {
    /// The locale for the navigation state as of now.
    #[must_use]
    pub fn current(&self) -> Locale {
        client_locale(&self.config, &self.state.borrow())
    }

    /// Waits for the next navigation change and returns the recomputed locale.
    ///
    /// Returns `None` once the [`Navigation`] has been dropped.
    pub async fn changed(&mut self) -> Option<Locale> {
        self.state.changed().await.ok()?;
        let params = self.state.borrow_and_update();
        Some(client_locale(&self.config, &params))
    }

    /// Runs `callback` with the recomputed locale after every navigation
    /// change, until the [`Navigation`] is dropped.
    pub fn on_change<F>(mut self, mut callback: F) -> JoinHandle<()>
    where
        F: FnMut(Locale) + Send + 'static,
    {
        tokio::spawn(async move {
            while let Some(locale) = self.changed().await {
                callback(locale);
            }
        })
    }
}
