// SPDX-License-Identifier: MPL-2.0
//! Route handlers.
//!
//! Each page handler hands the request's query to the locale resolver as a
//! deferred parameter bag, then renders with the matching dictionary.

use super::AppState;
use crate::i18n::{resolve_locale, Locale, QueryParams};
use axum::extract::{RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

async fn request_locale(state: &AppState, query: Option<String>) -> Locale {
    resolve_locale(&state.locales, async move {
        QueryParams::parse(query.as_deref().unwrap_or_default())
    })
    .await
}

pub async fn home(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Html<String> {
    let locale = request_locale(&state, query).await;
    Html(state.render_home(locale))
}

pub async fn anime(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Html<String> {
    let locale = request_locale(&state, query).await;
    Html(state.render_anime(locale).await)
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    match state.render_sitemap() {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render sitemap");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
