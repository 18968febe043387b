// SPDX-License-Identifier: MPL-2.0
//! Cached access to the configured user's collection.
//!
//! Pages are cached per (username, query) in an LRU with a fixed lifetime.
//! The lock is never held across a network request, so two concurrent cache
//! misses may both fetch; the later response simply replaces the earlier one.

use super::client::{BangumiClient, CollectionQuery};
use super::model::Collection;
use super::CollectionType;
use crate::config::BangumiConfig;
use crate::error::BangumiError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

type CacheKey = (String, CollectionQuery);

#[derive(Debug, Clone)]
struct CachedPage {
    fetched_at: Instant,
    collections: Arc<Vec<Collection>>,
}

/// Collection fetching with caching and graceful degradation.
#[derive(Debug)]
pub struct BangumiService {
    client: BangumiClient,
    settings: BangumiConfig,
    ttl: Duration,
    cache: Mutex<LruCache<CacheKey, CachedPage>>,
}

impl BangumiService {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(settings: BangumiConfig) -> Result<Self, BangumiError> {
        let client = BangumiClient::new(&settings)?;
        let capacity = NonZeroUsize::new(settings.cache_capacity()).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            client,
            ttl: settings.cache_ttl(),
            settings,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// The configured shelf for the configured user, or an empty list.
    ///
    /// Failures are logged and rendered by callers as "nothing to show".
    pub async fn collections(&self) -> Arc<Vec<Collection>> {
        self.collections_of(self.settings.collection_type()).await
    }

    /// Like [`collections`](Self::collections) for an explicit shelf.
    pub async fn collections_of(&self, collection_type: CollectionType) -> Arc<Vec<Collection>> {
        match self.try_collections_of(collection_type).await {
            Ok(collections) => collections,
            Err(BangumiError::MissingUsername) => {
                tracing::debug!("no Bangumi username configured; anime list left empty");
                Arc::new(Vec::new())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch Bangumi collections");
                Arc::new(Vec::new())
            }
        }
    }

    /// # Errors
    ///
    /// Propagates [`BangumiClient::user_collections`] failures. Failed
    /// fetches are not cached.
    pub async fn try_collections_of(
        &self,
        collection_type: CollectionType,
    ) -> Result<Arc<Vec<Collection>>, BangumiError> {
        let username = self
            .settings
            .username()
            .ok_or(BangumiError::MissingUsername)?
            .to_string();
        let query = CollectionQuery {
            collection_type,
            ..CollectionQuery::from_config(&self.settings)
        };
        let key = (username, query);

        if let Some(hit) = self.cached(&key).await {
            tracing::debug!(user = %key.0, ?collection_type, "Bangumi cache hit");
            return Ok(hit);
        }

        let page = self.client.user_collections(&key.0, query).await?;
        tracing::info!(
            user = %key.0,
            ?collection_type,
            count = page.data.len(),
            total = page.total,
            "fetched Bangumi collections"
        );

        let collections = Arc::new(page.data);
        if !self.ttl.is_zero() {
            self.cache.lock().await.put(
                key,
                CachedPage {
                    fetched_at: Instant::now(),
                    collections: Arc::clone(&collections),
                },
            );
        }
        Ok(collections)
    }

    async fn cached(&self, key: &CacheKey) -> Option<Arc<Vec<Collection>>> {
        let mut cache = self.cache.lock().await;
        let fresh = cache
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.collections));
        if fresh.is_none() {
            cache.pop(key);
        }
        fresh
    }

    /// Drops every cached page.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }
}
