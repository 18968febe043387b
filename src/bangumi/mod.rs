// SPDX-License-Identifier: MPL-2.0
//! Client for the Bangumi (bgm.tv) collection API.
//!
//! Only the read-only "user collections" endpoint is used: the anime page
//! shows what the configured user is currently watching. Responses are
//! cached in memory by [`BangumiService`] so page renders do not hit the API
//! every time.

pub mod client;
pub mod model;
pub mod service;

pub use client::{BangumiClient, CollectionQuery};
pub use model::{Collection, CollectionPage, Subject, SubjectImages};
pub use service::BangumiService;

use serde::{Deserialize, Serialize};

/// Category of a Bangumi subject.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectType {
    Book,
    #[default]
    Anime,
    Music,
    Game,
    Real,
}

impl SubjectType {
    /// Numeric code used by the API.
    pub const fn code(self) -> u8 {
        match self {
            SubjectType::Book => 1,
            SubjectType::Anime => 2,
            SubjectType::Music => 3,
            SubjectType::Game => 4,
            SubjectType::Real => 6,
        }
    }
}

/// The shelf a subject sits on in a user's collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionType {
    Wish,
    Done,
    #[default]
    Watching,
    OnHold,
    Dropped,
}

impl CollectionType {
    /// Numeric code used by the API.
    pub const fn code(self) -> u8 {
        match self {
            CollectionType::Wish => 1,
            CollectionType::Done => 2,
            CollectionType::Watching => 3,
            CollectionType::OnHold => 4,
            CollectionType::Dropped => 5,
        }
    }
}
