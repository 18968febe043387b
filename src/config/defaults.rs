// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Server**: Listening address
//! - **Bangumi API**: Endpoint, identification and page size
//! - **Bangumi Cache**: How long and how many collection pages are kept

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

// ==========================================================================
// Bangumi API Defaults
// ==========================================================================

/// Base URL of the public Bangumi API.
pub const DEFAULT_BANGUMI_API_BASE: &str = "https://api.bgm.tv";

/// The Bangumi API rejects requests without an identifying user agent.
pub const DEFAULT_BANGUMI_USER_AGENT: &str =
    concat!("portfolio_site/", env!("CARGO_PKG_VERSION"));

/// Default number of collection entries requested per page.
pub const DEFAULT_BANGUMI_LIMIT: u32 = 30;

/// Minimum page size.
pub const MIN_BANGUMI_LIMIT: u32 = 1;

/// Maximum page size accepted by the API.
pub const MAX_BANGUMI_LIMIT: u32 = 100;

/// Default request timeout (in seconds).
pub const DEFAULT_BANGUMI_TIMEOUT_SECS: u64 = 10;

/// Minimum request timeout (in seconds).
pub const MIN_BANGUMI_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_BANGUMI_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Bangumi Cache Defaults
// ==========================================================================

/// Default lifetime of a cached collection page (in seconds). 0 disables caching.
pub const DEFAULT_BANGUMI_CACHE_TTL_SECS: u64 = 3600;

/// Maximum cache lifetime (in seconds).
pub const MAX_BANGUMI_CACHE_TTL_SECS: u64 = 86_400;

/// Default number of (user, collection type) pages kept in memory.
pub const DEFAULT_BANGUMI_CACHE_CAPACITY: usize = 16;

/// Minimum cache capacity.
pub const MIN_BANGUMI_CACHE_CAPACITY: usize = 1;

/// Maximum cache capacity.
pub const MAX_BANGUMI_CACHE_CAPACITY: usize = 1024;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_BANGUMI_LIMIT > 0);
    assert!(DEFAULT_BANGUMI_LIMIT >= MIN_BANGUMI_LIMIT);
    assert!(DEFAULT_BANGUMI_LIMIT <= MAX_BANGUMI_LIMIT);

    assert!(MIN_BANGUMI_TIMEOUT_SECS > 0);
    assert!(DEFAULT_BANGUMI_TIMEOUT_SECS >= MIN_BANGUMI_TIMEOUT_SECS);
    assert!(DEFAULT_BANGUMI_TIMEOUT_SECS <= MAX_BANGUMI_TIMEOUT_SECS);

    assert!(DEFAULT_BANGUMI_CACHE_TTL_SECS <= MAX_BANGUMI_CACHE_TTL_SECS);

    assert!(MIN_BANGUMI_CACHE_CAPACITY > 0);
    assert!(DEFAULT_BANGUMI_CACHE_CAPACITY >= MIN_BANGUMI_CACHE_CAPACITY);
    assert!(DEFAULT_BANGUMI_CACHE_CAPACITY <= MAX_BANGUMI_CACHE_CAPACITY);
};
