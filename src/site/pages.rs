// SPDX-License-Identifier: MPL-2.0
//! Page composers: they turn a resolved locale, its dictionary and the site
//! data into complete HTML documents.

use super::card::AnimeCard;
use super::data::Project;
use super::html::{document, escape, markdown, markdown_inline, PageMeta};
use super::PageContext;
use crate::bangumi::Collection;

/// The home page: hero, contact links, about, projects, skills, education.
pub fn home(ctx: &PageContext<'_>) -> String {
    let dict = ctx.dictionary;
    let data = ctx.data;
    let profile = data.localized(ctx.locale);
    let home = dict.section("home");
    let sections = home.section("sections");
    let projects = home.section("projects");

    let mut body = String::from("<main>\n");

    // Hero
    body.push_str("<section id=\"hero\">\n");
    body.push_str(&format!(
        "<img class=\"avatar\" src=\"{}\" alt=\"{}\">\n",
        escape(&data.avatar_url),
        escape(&data.initials)
    ));
    match (profile.first_name, profile.surname) {
        (Some(first), Some(last)) => body.push_str(&format!(
            "<h1><span class=\"first-name\">{}</span> <span class=\"surname\">{}</span></h1>\n",
            escape(first),
            escape(last)
        )),
        _ => body.push_str(&format!("<h1>{}</h1>\n", escape(profile.name))),
    }
    body.push_str(&format!(
        "<p class=\"subtitle\">{}</p>\n<p class=\"description\">{}</p>\n</section>\n",
        escape(profile.subtitle),
        escape(profile.description)
    ));

    // Contact
    body.push_str(&format!(
        "<section id=\"social\" aria-label=\"{}\">\n<ul>\n",
        escape(&sections.text("social"))
    ));
    for link in &data.social {
        body.push_str(&format!(
            "<li><a href=\"{}\" rel=\"noopener noreferrer\">{}</a></li>\n",
            escape(&link.url),
            escape(&link.name)
        ));
    }
    body.push_str("</ul>\n</section>\n");

    // About
    body.push_str(&format!(
        "<section id=\"about\">\n<h2>{}</h2>\n<div class=\"prose\">{}</div>\n</section>\n",
        escape(&sections.text("about")),
        markdown(profile.summary)
    ));

    // Projects
    body.push_str(&format!(
        "<section id=\"projects\">\n<div class=\"badge\">{}</div>\n<h2>{}</h2>\n<div class=\"project-grid\">\n",
        escape(&projects.text("badge")),
        escape(&projects.text("title"))
    ));
    let authors_label = projects.text("authors");
    for project in &data.projects {
        body.push_str(&project_card(project, &authors_label));
        body.push('\n');
    }
    body.push_str("</div>\n</section>\n");

    // Skills
    body.push_str(&format!(
        "<section id=\"skills\">\n<h2>{}</h2>\n<ul class=\"skills\">\n",
        escape(&sections.text("skills"))
    ));
    for skill in &data.skills {
        body.push_str(&format!("<li>{}</li>\n", escape(skill)));
    }
    body.push_str("</ul>\n</section>\n");

    // Education
    body.push_str(&format!(
        "<section id=\"education\">\n<h2>{}</h2>\n<ul class=\"education\">\n",
        escape(&sections.text("education"))
    ));
    for entry in &data.education {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <span class=\"degree\">{}</span> <span class=\"period\">{} - {}</span></li>\n",
            escape(&entry.href),
            escape(&entry.school),
            escape(&entry.degree),
            escape(&entry.start),
            escape(&entry.end)
        ));
    }
    body.push_str("</ul>\n</section>\n</main>");

    let title = home.text("metadata.title");
    let description = home.text("metadata.description");
    document(
        ctx,
        PageMeta {
            title: &title,
            description: &description,
            path: "/",
        },
        &body,
    )
}

fn project_card(project: &Project, authors_label: &str) -> String {
    let mut out = format!(
        "<article class=\"project{}\">\n",
        if project.active { " active" } else { "" }
    );
    if !project.video.is_empty() {
        out.push_str(&format!(
            "<video src=\"{}\" autoplay loop muted playsinline></video>\n",
            escape(&project.video)
        ));
    } else if !project.image.is_empty() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
            escape(&project.image),
            escape(&project.title)
        ));
    }
    out.push_str(&format!(
        "<h3><a href=\"{}\">{}</a></h3>\n<time>{}</time>\n<p>{}</p>\n",
        escape(&project.href),
        escape(&project.title),
        escape(&project.dates),
        escape(&project.description)
    ));
    if !project.authors.is_empty() {
        out.push_str(&format!(
            "<p class=\"authors\"><strong>{}:</strong> {}</p>\n",
            escape(authors_label),
            markdown_inline(&project.authors)
        ));
    }
    if !project.links.is_empty() {
        out.push_str("<ul class=\"links\">\n");
        for link in &project.links {
            out.push_str(&format!(
                "<li><a class=\"link-{}\" href=\"{}\">{}</a></li>\n",
                link.kind.as_str(),
                escape(&link.href),
                escape(&link.label)
            ));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</article>");
    out
}

/// The anime showcase page for an already fetched list of collections.
pub fn anime(ctx: &PageContext<'_>, collections: &[Collection]) -> String {
    let anime = ctx.dictionary.section("anime");

    let mut body = format!(
        "<main>\n<section id=\"anime\">\n<h1>{}</h1>\n<p class=\"description\">{}</p>\n",
        escape(&anime.text("title")),
        escape(&anime.text("description"))
    );

    if collections.is_empty() {
        body.push_str(&format!(
            "<p class=\"empty\">{}</p>\n",
            escape(&anime.text("no_anime"))
        ));
    } else {
        body.push_str("<div class=\"anime-grid\">\n");
        for collection in collections {
            let card = AnimeCard::from_collection(collection, ctx.locale, ctx.dictionary);
            body.push_str(&card.render());
            body.push('\n');
        }
        body.push_str("</div>\n");
    }
    body.push_str("</section>\n</main>");

    let title = anime.text("metadata.title");
    let description = anime.text("metadata.description");
    document(
        ctx,
        PageMeta {
            title: &title,
            description: &description,
            path: "/anime",
        },
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bangumi::Subject;
    use crate::i18n::{DictionaryLoader, Locale, LocaleConfig};
    use crate::site::SiteData;

    struct Fixture {
        locales: LocaleConfig,
        loader: DictionaryLoader,
        data: SiteData,
    }

    impl Fixture {
        fn new() -> Self {
            let locales = LocaleConfig::standard();
            let loader = DictionaryLoader::new(&locales).expect("bundles load");
            let data = SiteData::embedded().expect("site data loads");
            Self {
                locales,
                loader,
                data,
            }
        }

        fn ctx(&self, locale: Locale) -> PageContext<'_> {
            PageContext {
                locale,
                locales: &self.locales,
                dictionary: self.loader.load(locale),
                data: &self.data,
            }
        }
    }

    #[test]
    fn home_uses_locale_specific_headings_and_profile() {
        let fixture = Fixture::new();

        let en = home(&fixture.ctx(Locale::En));
        assert!(en.contains("<html lang=\"en\">"));
        assert!(en.contains("<h2>About</h2>"));
        assert!(en.contains("<span class=\"first-name\">Zangwei</span>"));

        let zh = home(&fixture.ctx(Locale::Zh));
        assert!(zh.contains("<html lang=\"zh\">"));
        assert!(zh.contains("<h2>关于</h2>"));
        assert!(zh.contains(&format!("<h1>{}</h1>", fixture.data.chinese.name)));
        assert!(!zh.contains("first-name"));
    }

    #[test]
    fn home_lists_every_project_with_rendered_authors() {
        let fixture = Fixture::new();
        let html = home(&fixture.ctx(Locale::En));
        for project in &fixture.data.projects {
            assert!(html.contains(&*escape(&project.title)), "{}", project.title);
        }
        assert!(html.contains("<strong>Authors:</strong> <strong>Zangwei Zheng</strong>"));
        assert!(!html.contains("MISSING:"));
    }

    #[test]
    fn language_switcher_links_to_both_locales() {
        let fixture = Fixture::new();
        let html = home(&fixture.ctx(Locale::En));
        assert!(html.contains("<a href=\"/\" hreflang=\"zh\">中文</a>"));
        assert!(html.contains("<a href=\"/?lang=en\" hreflang=\"en\" aria-current=\"true\">English</a>"));
        // Navigation keeps the current locale.
        assert!(html.contains("<a href=\"/anime?lang=en\">Anime</a>"));
    }

    #[test]
    fn anime_page_shows_empty_message_without_collections() {
        let fixture = Fixture::new();
        let html = anime(&fixture.ctx(Locale::Zh), &[]);
        assert!(html.contains("<title>追番 | 郑奘巍</title>"));
        assert!(html.contains("<p class=\"empty\">暂时没有在看的番剧。</p>"));
        assert!(!html.contains("anime-grid"));
        assert!(!html.contains("MISSING:"));
    }

    #[test]
    fn anime_page_renders_cards() {
        let fixture = Fixture::new();
        let collections = vec![Collection {
            subject: Subject {
                id: 7,
                name: "Mushishi".to_string(),
                name_cn: "虫师".to_string(),
                date: Some("2005-10-22".to_string()),
                images: None,
                eps: 26,
                score: 8.8,
            },
            ep_status: 3,
            updated_at: None,
        }];

        let html = anime(&fixture.ctx(Locale::En), &collections);
        assert!(html.contains("anime-grid"));
        assert!(html.contains("<h3>Mushishi</h3>"));
        assert!(html.contains("Progress: 3/26"));
        assert!(html.contains("https://bgm.tv/subject/7"));
        assert!(!html.contains("Nothing on the watch list"));
    }
}
