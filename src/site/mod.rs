// SPDX-License-Identifier: MPL-2.0
//! Page rendering: profile data, page composers, anime cards and the sitemap.

pub mod card;
pub mod data;
pub mod html;
pub mod pages;
pub mod sitemap;

pub use card::AnimeCard;
pub use data::SiteData;

use crate::i18n::{Dictionary, Locale, LocaleConfig};

/// Everything a page composer needs for one render.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Locale the page is rendered in.
    pub locale: Locale,
    pub locales: &'a LocaleConfig,
    /// Dictionary for `locale`.
    pub dictionary: &'a Dictionary,
    pub data: &'a SiteData,
}
