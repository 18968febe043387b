// SPDX-License-Identifier: MPL-2.0
//! Anime cards built from Bangumi collection entries.

use super::html::escape;
use crate::bangumi::Collection;
use crate::i18n::{Dictionary, FluentArgs, Locale};
use chrono::{Datelike, NaiveDate};

/// Public subject page on bgm.tv.
pub const SUBJECT_URL_BASE: &str = "https://bgm.tv/subject/";

/// Display-ready view of one collection entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeCard {
    pub title: String,
    pub url: String,
    pub cover: Option<String>,
    /// Localized "watched/total" label; absent when the episode count is unknown.
    pub progress: Option<String>,
    /// Rating with one decimal; absent for unrated subjects.
    pub score: Option<String>,
    pub year: Option<i32>,
}

impl AnimeCard {
    pub fn from_collection(collection: &Collection, locale: Locale, dictionary: &Dictionary) -> Self {
        let subject = &collection.subject;

        let title = if locale == Locale::Zh && !subject.name_cn.is_empty() {
            subject.name_cn.clone()
        } else {
            subject.name.clone()
        };

        let progress = (subject.eps > 0).then(|| {
            let mut args = FluentArgs::new();
            args.set("watched", collection.ep_status);
            args.set("total", subject.eps);
            dictionary.text_with("anime.progress", &args)
        });

        let score = (subject.score > 0.0).then(|| format!("{:.1}", subject.score));

        let year = subject
            .date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year());

        Self {
            title,
            url: format!("{SUBJECT_URL_BASE}{}", subject.id),
            cover: subject.cover().map(str::to_string),
            progress,
            score,
            year,
        }
    }

    pub fn render(&self) -> String {
        let title = escape(&self.title);
        let mut out = format!(
            "<a class=\"anime-card\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">\n",
            escape(&self.url)
        );
        out.push_str("<div class=\"cover\">");
        if let Some(cover) = &self.cover {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{title}\" loading=\"lazy\">",
                escape(cover)
            ));
        }
        out.push_str("</div>\n");
        out.push_str(&format!("<h3>{title}</h3>\n<div class=\"meta\">"));
        if let Some(progress) = &self.progress {
            out.push_str(&format!("<span>{}</span>", escape(progress)));
        }
        if let Some(score) = &self.score {
            out.push_str(&format!("<span class=\"badge\">⭐ {score}</span>"));
        }
        out.push_str("</div>\n");
        if let Some(year) = self.year {
            out.push_str(&format!("<p class=\"year\">{year}</p>\n"));
        }
        out.push_str("</a>");
        out
    }
}
