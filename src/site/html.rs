// SPDX-License-Identifier: MPL-2.0
//! HTML building blocks shared by all pages.
//!
//! Text from dictionaries, site data and the Bangumi API is always escaped;
//! only the markdown fields of the embedded site data are rendered as HTML.

use super::PageContext;
use crate::i18n::{Locale, SELECTOR_PARAM};
use pulldown_cmark::{html, Parser};
use std::borrow::Cow;

/// Escapes text for use in element content or quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Renders trusted markdown to HTML.
pub fn markdown(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new(source));
    out
}

/// Same as [`markdown`] without the wrapping `<p>` of a single paragraph.
pub fn markdown_inline(source: &str) -> String {
    let rendered = markdown(source);
    let trimmed = rendered.trim_end();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => rendered,
    }
}

/// Link to `path` in `locale`. The default locale needs no selector, which
/// keeps canonical URLs short.
pub fn locale_href(ctx: &PageContext<'_>, path: &str, locale: Locale) -> String {
    if locale == ctx.locales.default_locale() {
        path.to_string()
    } else {
        format!("{path}?{SELECTOR_PARAM}={}", locale.tag())
    }
}

/// `<title>`, description and body text for one page.
#[derive(Debug, Clone, Copy)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Path of the page itself, used by the language switcher.
    pub path: &'a str,
}

/// Wraps `body` in the shared document shell: head, navigation and the
/// language switcher.
pub fn document(ctx: &PageContext<'_>, meta: PageMeta<'_>, body: &str) -> String {
    let dict = ctx.dictionary;
    let mut out = String::with_capacity(body.len() + 2048);

    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!("<html lang=\"{}\">\n<head>\n", ctx.locale.tag()));
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(meta.title)));
    out.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape(meta.description)
    ));
    for &alternate in ctx.locales.supported_locales() {
        out.push_str(&format!(
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
            alternate.tag(),
            escape(&locale_href(ctx, meta.path, alternate))
        ));
    }
    out.push_str("</head>\n<body>\n");

    out.push_str("<header>\n<nav>\n");
    for (path, key) in [("/", "nav.home"), ("/anime", "nav.anime")] {
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            escape(&locale_href(ctx, path, ctx.locale)),
            escape(&dict.text(key))
        ));
    }
    out.push_str(&format!(
        "<div class=\"language-switcher\" aria-label=\"{}\">\n",
        escape(&dict.text("nav.language"))
    ));
    for &option in ctx.locales.supported_locales() {
        let current = if option == ctx.locale {
            " aria-current=\"true\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<a href=\"{}\" hreflang=\"{}\"{current}>{}</a>\n",
            escape(&locale_href(ctx, meta.path, option)),
            option.tag(),
            escape(&dict.text(&format!("language.{}", option.tag())))
        ));
    }
    out.push_str("</div>\n</nav>\n</header>\n");

    out.push_str(body);
    out.push_str("\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_and_quotes() {
        assert_eq!(escape("<b>\"Tom & Jerry\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn markdown_renders_emphasis_and_links() {
        let html = markdown("**bold** and [link](https://example.com)");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<a href=\"https://example.com\">link</a>"));
    }

    #[test]
    fn markdown_inline_drops_single_paragraph_wrapper() {
        assert_eq!(markdown_inline("**A**, B"), "<strong>A</strong>, B");
        let multi = markdown_inline("one\n\ntwo");
        assert!(multi.starts_with("<p>one</p>"));
    }
}
