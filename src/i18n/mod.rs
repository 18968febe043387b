// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the site.
//!
//! Pages are rendered in the locale selected by the `lang` query parameter,
//! falling back to the configured default when the parameter is absent or
//! names a locale the site does not serve.
//!
//! # Features
//!
//! - Immutable [`LocaleConfig`] passed explicitly to every consumer
//! - Request-side resolution over a deferred parameter bag ([`resolve_locale`])
//! - Live resolution that follows client-side navigation ([`LiveLocale`])
//! - Embedded Fluent `.ftl` dictionaries, one per locale ([`DictionaryLoader`])

pub mod dictionary;
pub mod live;
pub mod locale;
pub mod params;
pub mod resolver;

pub use dictionary::{Dictionary, DictionaryLoader, Section};
pub use fluent_bundle::FluentArgs;
pub use live::{client_locale, LiveLocale, Navigation};
pub use locale::{Locale, LocaleConfig, UnknownLocale};
pub use params::QueryParams;
pub use resolver::{locale_from_params, resolve_locale, SELECTOR_PARAM};
