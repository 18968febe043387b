// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the Bangumi v0 API.

use super::model::CollectionPage;
use super::{CollectionType, SubjectType};
use crate::config::BangumiConfig;
use crate::error::BangumiError;
use url::Url;

/// Which slice of a user's collection to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionQuery {
    pub subject_type: SubjectType,
    pub collection_type: CollectionType,
    pub limit: u32,
    pub offset: u32,
}

impl CollectionQuery {
    /// First page of the shelf configured in `settings`.
    pub fn from_config(settings: &BangumiConfig) -> Self {
        Self {
            subject_type: settings.subject_type(),
            collection_type: settings.collection_type(),
            limit: settings.limit(),
            offset: 0,
        }
    }
}

/// Thin wrapper around `reqwest::Client` bound to one API base URL.
#[derive(Debug, Clone)]
pub struct BangumiClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl BangumiClient {
    /// Builds a client with the configured user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BangumiError::Request`] if the TLS backend cannot be
    /// initialized.
    pub fn new(settings: &BangumiConfig) -> Result<Self, BangumiError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| BangumiError::Request(e.to_string()))?;

        Ok(Self {
            http,
            api_base: settings.api_base().to_string(),
            token: settings.token().map(str::to_string),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `{api_base}/v0/users/{username}/collections`, with `username`
    /// percent-encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`BangumiError::Request`] if the API base is not a usable URL
    /// or `username` is a dot segment.
    pub fn collections_url(&self, username: &str) -> Result<Url, BangumiError> {
        if username == "." || username == ".." {
            return Err(BangumiError::Request(format!(
                "invalid Bangumi username {username:?}"
            )));
        }
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| BangumiError::Request(format!("invalid API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| BangumiError::Request("API base cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v0", "users", username, "collections"]);
        Ok(url)
    }

    /// Fetches one page of `username`'s collection.
    ///
    /// # Errors
    ///
    /// Returns [`BangumiError::MissingUsername`] for an empty username,
    /// [`BangumiError::Status`] for non-success responses, and
    /// [`BangumiError::Request`]/[`BangumiError::Decode`] for transport and
    /// parsing failures.
    pub async fn user_collections(
        &self,
        username: &str,
        query: CollectionQuery,
    ) -> Result<CollectionPage, BangumiError> {
        if username.is_empty() {
            return Err(BangumiError::MissingUsername);
        }

        let url = self.collections_url(username)?;
        let mut request = self.http.get(url).query(&[
            ("subject_type", u32::from(query.subject_type.code())),
            ("type", u32::from(query.collection_type.code())),
            ("limit", query.limit),
            ("offset", query.offset),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BangumiError::from_reqwest(&e))?;

        if !response.status().is_success() {
            return Err(BangumiError::Status(response.status().as_u16()));
        }

        response
            .json::<CollectionPage>()
            .await
            .map_err(|e| BangumiError::from_reqwest(&e))
    }
}
