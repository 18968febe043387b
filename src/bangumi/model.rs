// SPDX-License-Identifier: MPL-2.0
//! Response types of `GET /v0/users/{username}/collections`.
//!
//! Only the fields the anime page needs are modelled; unknown fields are
//! ignored and missing optional fields fall back to their defaults.

use serde::{Deserialize, Serialize};

/// One page of a user's collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub data: Vec<Collection>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// A subject in the user's collection, with their watch progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub subject: Subject,
    /// Episodes marked as watched.
    #[serde(default)]
    pub ep_status: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_cn: String,
    /// Air date as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<SubjectImages>,
    /// Total episode count; 0 when unknown.
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub score: f64,
}

/// Cover image URLs in the sizes Bangumi provides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectImages {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub grid: String,
}

impl Subject {
    /// The large cover URL, if one was provided.
    pub fn cover(&self) -> Option<&str> {
        self.images
            .as_ref()
            .map(|images| images.large.as_str())
            .filter(|url| !url.is_empty())
    }
}
