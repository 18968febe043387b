// SPDX-License-Identifier: MPL-2.0
//! Application root state and the HTTP server.
//!
//! [`AppState`] wires together the immutable pieces every request reads (locale
//! configuration, dictionaries, site data) and the Bangumi service. It is
//! built once at startup and shared behind an `Arc`; requests never mutate it
//! apart from the Bangumi cache, which has its own lock.

pub mod handlers;
pub mod paths;

use crate::bangumi::BangumiService;
use crate::config::Config;
use crate::error::Result;
use crate::i18n::{DictionaryLoader, Locale, LocaleConfig};
use crate::site::{pages, sitemap, PageContext, SiteData};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use std::sync::Arc;

/// Shared, read-mostly state behind every request.
#[derive(Debug)]
pub struct AppState {
    pub locales: LocaleConfig,
    pub dictionaries: DictionaryLoader,
    pub data: SiteData,
    pub bangumi: BangumiService,
    base_url: String,
}

impl AppState {
    /// Builds the state from the loaded configuration and the embedded assets.
    ///
    /// # Errors
    ///
    /// Fails if the embedded translations or site data do not parse, or the
    /// Bangumi HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_parts(config, LocaleConfig::standard(), SiteData::embedded()?)
    }

    /// Like [`new`](Self::new) with explicit locale configuration and data.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_parts(config: &Config, locales: LocaleConfig, data: SiteData) -> Result<Self> {
        let dictionaries = DictionaryLoader::new(&locales)?;
        let bangumi = BangumiService::new(config.bangumi.clone())?;
        let base_url = config
            .site
            .base_url
            .as_deref()
            .unwrap_or_else(|| data.base_url())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            locales,
            dictionaries,
            data,
            bangumi,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_context(&self, locale: Locale) -> PageContext<'_> {
        PageContext {
            locale,
            locales: &self.locales,
            dictionary: self.dictionaries.load(locale),
            data: &self.data,
        }
    }

    pub fn render_home(&self, locale: Locale) -> String {
        pages::home(&self.page_context(locale))
    }

    /// Fetches (or reuses cached) collections and renders the anime page.
    pub async fn render_anime(&self, locale: Locale) -> String {
        let collections = self.bangumi.collections().await;
        pages::anime(&self.page_context(locale), &collections)
    }

    /// # Errors
    ///
    /// Returns an error if the XML writer fails.
    pub fn render_sitemap(&self) -> Result<String> {
        let entries = sitemap::entries(&self.base_url, &self.locales, Utc::now());
        sitemap::render(&entries)
    }
}

/// Routes: `/`, `/anime` and `/sitemap.xml`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/anime", get(handlers::anime))
        .route("/sitemap.xml", get(handlers::sitemap))
        .with_state(state)
}

/// Serves the site on `addr` until Ctrl+C.
///
/// # Errors
///
/// Returns [`Error::Io`] if the address cannot be bound or the server fails.
pub async fn serve(state: Arc<AppState>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving portfolio site");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn base_url_prefers_config_over_profile() {
        let config = Config {
            site: SiteConfig {
                base_url: Some("https://mirror.example.org/".to_string()),
                bind: None,
            },
            ..Config::default()
        };
        let state = AppState::new(&config).expect("state builds");
        assert_eq!(state.base_url(), "https://mirror.example.org");

        let state = AppState::new(&Config::default()).expect("state builds");
        assert_eq!(state.base_url(), state.data.base_url());
    }

    #[test]
    fn render_home_uses_requested_locale() {
        let state = AppState::new(&Config::default()).expect("state builds");
        assert!(state.render_home(Locale::En).contains("<html lang=\"en\">"));
        assert!(state.render_home(Locale::Zh).contains("<html lang=\"zh\">"));
    }

    #[test]
    fn render_sitemap_uses_base_url() {
        let state = AppState::new(&Config::default()).expect("state builds");
        let xml = state.render_sitemap().expect("sitemap renders");
        assert!(xml.contains(&format!("<loc>{}</loc>", state.base_url())));
    }
}
