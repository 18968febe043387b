// SPDX-License-Identifier: MPL-2.0
//! `sitemap.xml` generation.
//!
//! Every page is listed once per supported locale. The default locale uses
//! the bare URL; the others carry the `lang` selector.

use crate::error::{Error, Result};
use crate::i18n::{LocaleConfig, SELECTOR_PARAM};
use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt;
use std::io::Cursor;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Routes listed in the sitemap with their priority in the default locale
/// and in the alternates.
const ROUTES: [(&str, f32, f32); 2] = [("", 1.0, 0.9), ("/anime", 0.8, 0.8)];

/// Lists every page in every supported locale, stamped with `now`.
pub fn entries(base_url: &str, locales: &LocaleConfig, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let mut ordered = vec![locales.default_locale()];
    ordered.extend(
        locales
            .supported_locales()
            .iter()
            .copied()
            .filter(|&locale| locale != locales.default_locale()),
    );

    let mut out = Vec::with_capacity(ordered.len() * ROUTES.len());
    for locale in ordered {
        let is_default = locale == locales.default_locale();
        for (path, default_priority, alternate_priority) in ROUTES {
            let (url, priority) = if is_default {
                (format!("{base}{path}"), default_priority)
            } else {
                let path = if path.is_empty() { "/" } else { path };
                (
                    format!("{base}{path}?{SELECTOR_PARAM}={}", locale.tag()),
                    alternate_priority,
                )
            };
            out.push(SitemapEntry {
                url,
                last_modified: now,
                change_frequency: ChangeFrequency::Weekly,
                priority,
            });
        }
    }
    out
}

fn xml_error(err: impl fmt::Display) -> Error {
    Error::Io(format!("failed to write sitemap: {err}"))
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

/// Serializes `entries` as a sitemap-protocol `urlset` document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the XML writer fails.
pub fn render(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset)).map_err(xml_error)?;

    for entry in entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;
        write_text_element(&mut writer, "loc", &entry.url)?;
        write_text_element(
            &mut writer,
            "lastmod",
            &entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
        write_text_element(&mut writer, "changefreq", &entry.change_frequency.to_string())?;
        write_text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::Io(format!("sitemap is not UTF-8: {e}")))
}
