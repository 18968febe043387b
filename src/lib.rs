// SPDX-License-Identifier: MPL-2.0
//! `portfolio_site` serves a bilingual (Chinese/English) personal homepage.
//!
//! Every page is rendered in the locale chosen by the `lang` query parameter,
//! with Chinese as the default, from embedded Fluent dictionaries. An anime
//! page lists the owner's Bangumi collection.

#![doc(html_root_url = "https://docs.rs/portfolio_site/0.1.0")]

pub mod app;
pub mod bangumi;
pub mod config;
pub mod error;
pub mod i18n;
pub mod site;
