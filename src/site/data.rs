// SPDX-License-Identifier: MPL-2.0
//! Static profile and project data.
//!
//! The data ships inside the binary as `assets/data/site.toml`. English text
//! sits at the top level; the `[chinese]` table overrides the localized
//! fields.

use crate::error::{Error, Result};
use crate::i18n::Locale;
use rust_embed::RustEmbed;
use serde::Deserialize;

#[derive(RustEmbed)]
#[folder = "assets/data/"]
struct SiteAssets;

const SITE_FILE: &str = "site.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteData {
    pub name: String,
    pub first_name: String,
    pub surname: String,
    pub initials: String,
    /// Canonical URL of the deployed site.
    pub url: String,
    pub avatar_url: String,
    pub subtitle: String,
    pub description: String,
    /// Markdown.
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub chinese: ChineseProfile,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Chinese overrides for the localized profile fields.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChineseProfile {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Education {
    pub school: String,
    pub href: String,
    pub degree: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    Github,
    Paper,
    Website,
    Blog,
}

impl LinkKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            LinkKind::Github => "github",
            LinkKind::Paper => "paper",
            LinkKind::Website => "website",
            LinkKind::Blog => "blog",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProjectLink {
    pub kind: LinkKind,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Project {
    pub title: String,
    pub href: String,
    pub dates: String,
    #[serde(default)]
    pub active: bool,
    pub description: String,
    /// Markdown author list; empty for non-paper projects.
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub video: String,
}

/// The profile fields a page shows for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedProfile<'a> {
    pub name: &'a str,
    /// Only shown in English, where the name splits into given name and surname.
    pub first_name: Option<&'a str>,
    pub surname: Option<&'a str>,
    pub subtitle: &'a str,
    pub description: &'a str,
    pub summary: &'a str,
}

impl SiteData {
    /// Parses the embedded `site.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file is missing or malformed.
    pub fn embedded() -> Result<Self> {
        let file = SiteAssets::get(SITE_FILE)
            .ok_or_else(|| Error::Config(format!("embedded {SITE_FILE} is missing")))?;
        Self::from_toml(&String::from_utf8_lossy(file.data.as_ref()))
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] if `source` is not valid site data.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn localized(&self, locale: Locale) -> LocalizedProfile<'_> {
        match locale {
            Locale::En => LocalizedProfile {
                name: &self.name,
                first_name: Some(&self.first_name),
                surname: Some(&self.surname),
                subtitle: &self.subtitle,
                description: &self.description,
                summary: &self.summary,
            },
            Locale::Zh => LocalizedProfile {
                name: &self.chinese.name,
                first_name: None,
                surname: None,
                subtitle: &self.chinese.subtitle,
                description: &self.chinese.description,
                summary: &self.chinese.summary,
            },
        }
    }

    /// Canonical URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
