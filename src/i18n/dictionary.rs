// SPDX-License-Identifier: MPL-2.0
//! Translation dictionaries backed by Fluent bundles.
//!
//! Each supported locale gets one [`Dictionary`], built from the `.ftl` file
//! embedded under `assets/i18n/`. Keys are dotted paths (`home.sections.about`)
//! which map onto Fluent message ids by replacing dots with hyphens
//! (`home-sections-about`). Path segments are single words, so the mapping is
//! reversible.

use super::locale::{Locale, LocaleConfig};
use crate::error::{Error, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use fluent_syntax::ast;
use rust_embed::RustEmbed;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Translations;

fn message_id(path: &str) -> String {
    path.replace('.', "-")
}

fn key_path(id: &str) -> String {
    id.replace('-', ".")
}

/// The localized UI strings for one locale.
pub struct Dictionary {
    locale: Locale,
    bundle: FluentBundle<FluentResource>,
    keys: BTreeSet<String>,
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("locale", &self.locale)
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl Dictionary {
    /// Parses Fluent source into a dictionary for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translation`] if the source has syntax errors or
    /// defines the same message twice.
    pub fn from_ftl(locale: Locale, source: &str) -> Result<Self> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            Error::Translation(format!("{locale}.ftl: {} syntax error(s): {errors:?}", errors.len()))
        })?;

        let keys = resource
            .entries()
            .filter_map(|entry| match entry {
                ast::Entry::Message(message) if message.value.is_some() => {
                    Some(key_path(message.id.name))
                }
                _ => None,
            })
            .collect();

        let mut bundle = FluentBundle::new_concurrent(vec![locale.language_identifier()]);
        // Unicode isolation marks would leak into the generated HTML.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| Error::Translation(format!("{locale}.ftl: {errors:?}")))?;

        Ok(Self {
            locale,
            bundle,
            keys,
        })
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Every key path this dictionary defines, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.keys.contains(path)
    }

    /// Looks up and formats the string at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<String> {
        self.format_message(path, None)
    }

    /// Like [`get`](Self::get), substituting Fluent variables from `args`.
    #[must_use]
    pub fn get_with(&self, path: &str, args: &FluentArgs<'_>) -> Option<String> {
        self.format_message(path, Some(args))
    }

    /// The string at `path`, or a visible `MISSING:` marker.
    ///
    /// Page code only asks for keys shipped in every bundle; the marker makes
    /// a typo obvious in the rendered page instead of failing the request.
    #[must_use]
    pub fn text(&self, path: &str) -> String {
        self.get(path).unwrap_or_else(|| format!("MISSING: {path}"))
    }

    #[must_use]
    pub fn text_with(&self, path: &str, args: &FluentArgs<'_>) -> String {
        self.get_with(path, args)
            .unwrap_or_else(|| format!("MISSING: {path}"))
    }

    /// A view of the sub-mapping below `prefix`.
    #[must_use]
    pub fn section<'a>(&'a self, prefix: &str) -> Section<'a> {
        Section {
            dictionary: self,
            prefix: prefix.to_string(),
        }
    }

    fn format_message(&self, path: &str, args: Option<&FluentArgs<'_>>) -> Option<String> {
        let message = self.bundle.get_message(&message_id(path))?;
        let pattern = message.value()?;
        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        errors.is_empty().then(|| value.into_owned())
    }
}

/// A nested portion of a [`Dictionary`], e.g. everything under `home`.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    dictionary: &'a Dictionary,
    prefix: String,
}

impl<'a> Section<'a> {
    fn path(&self, key: &str) -> String {
        format!("{}.{key}", self.prefix)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.dictionary.get(&self.path(key))
    }

    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.dictionary.text(&self.path(key))
    }

    #[must_use]
    pub fn text_with(&self, key: &str, args: &FluentArgs<'_>) -> String {
        self.dictionary.text_with(&self.path(key), args)
    }

    #[must_use]
    pub fn section(&self, key: &str) -> Section<'a> {
        Section {
            dictionary: self.dictionary,
            prefix: self.path(key),
        }
    }
}

/// Preloaded dictionaries for every locale of a [`LocaleConfig`].
#[derive(Debug)]
pub struct DictionaryLoader {
    default_locale: Locale,
    dictionaries: HashMap<Locale, Dictionary>,
}

impl DictionaryLoader {
    /// Loads the embedded bundle of each supported locale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translation`] if a supported locale has no embedded
    /// bundle or its bundle does not parse.
    pub fn new(config: &LocaleConfig) -> Result<Self> {
        Self::from_sources(config, |locale| {
            let file = format!("{}.ftl", locale.tag());
            Translations::get(&file)
                .map(|content| String::from_utf8_lossy(content.data.as_ref()).into_owned())
        })
    }

    /// Builds the loader from caller-provided Fluent sources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translation`] if `source` yields nothing for a
    /// supported locale or a source does not parse.
    pub fn from_sources<F>(config: &LocaleConfig, mut source: F) -> Result<Self>
    where
        F: FnMut(Locale) -> Option<String>,
    {
        let mut dictionaries = HashMap::new();
        for &locale in config.supported_locales() {
            let ftl = source(locale).ok_or_else(|| {
                Error::Translation(format!("no translation bundle for locale `{locale}`"))
            })?;
            dictionaries.insert(locale, Dictionary::from_ftl(locale, &ftl)?);
        }
        Ok(Self {
            default_locale: config.default_locale(),
            dictionaries,
        })
    }

    /// The dictionary for `locale`.
    ///
    /// # Panics
    ///
    /// Panics if `locale` is not one of the configured locales. Resolvers
    /// only ever produce configured locales, so reaching this is a bug.
    #[must_use]
    pub fn load(&self, locale: Locale) -> &Dictionary {
        match self.dictionaries.get(&locale) {
            Some(dictionary) => dictionary,
            None => panic!("dictionary requested for unsupported locale `{locale}`"),
        }
    }

    /// Keys present in the default locale's dictionary but absent from
    /// `locale`'s.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let reference = self.load(self.default_locale);
        let candidate = self.load(locale);
        reference
            .keys()
            .filter(|key| !candidate.contains(key))
            .map(str::to_string)
            .collect()
    }
}
