// SPDX-License-Identifier: MPL-2.0
//! Supported locales and the immutable locale configuration.
//!
//! [`LocaleConfig`] is constructed once at startup and handed by reference
//! (or behind an `Arc`) to the resolvers and the dictionary loader. Nothing in
//! this crate reads locale settings from global state.

use std::fmt;
use std::str::FromStr;
use unic_langid::{langid, LanguageIdentifier};

/// A language variant the site can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Simplified Chinese.
    Zh,
    /// English.
    En,
}

impl Locale {
    /// Every locale the crate ships translations for.
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    /// The tag used in URLs and in the `lang` attribute of rendered pages.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Matches a tag exactly (case-sensitive), as it appears in a query string.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.tag() == tag)
    }

    /// The Fluent language identifier for this locale.
    #[must_use]
    pub fn language_identifier(self) -> LanguageIdentifier {
        match self {
            Locale::Zh => langid!("zh"),
            Locale::En => langid!("en"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string is not one of the known locale tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale tag: {:?}", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// The set of locales a deployment accepts, and the one used when a request
/// does not select a valid alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    supported: Vec<Locale>,
    default: Locale,
}

impl LocaleConfig {
    /// Builds a configuration from an explicit locale set.
    ///
    /// Duplicates are removed while preserving the first occurrence order.
    ///
    /// # Panics
    ///
    /// Panics if `default` is not part of `supported`. A configuration like
    /// that is a programming error, not something a request can trigger.
    #[must_use]
    pub fn new(supported: impl IntoIterator<Item = Locale>, default: Locale) -> Self {
        let mut locales: Vec<Locale> = Vec::new();
        for locale in supported {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        assert!(
            locales.contains(&default),
            "default locale `{default}` must be one of the supported locales {locales:?}"
        );
        Self {
            supported: locales,
            default,
        }
    }

    /// Chinese by default, with English as the alternate.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([Locale::Zh, Locale::En], Locale::Zh)
    }

    #[must_use]
    pub fn supported_locales(&self) -> &[Locale] {
        &self.supported
    }

    #[must_use]
    pub fn default_locale(&self) -> Locale {
        self.default
    }

    #[must_use]
    pub fn is_supported(&self, locale: Locale) -> bool {
        self.supported.contains(&locale)
    }

    /// Returns the locale named by `tag` if this configuration accepts it.
    #[must_use]
    pub fn parse(&self, tag: &str) -> Option<Locale> {
        Locale::from_tag(tag).filter(|locale| self.is_supported(*locale))
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::standard()
    }
}
