//! Wiki API response type definitions.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response wrapper for `GET <page>.json`.
#[derive(Debug, Deserialize)]
pub struct WikiPageResponse {
    pub wiki_page: WikiPage,
}

/// A wiki page record.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiPage {
    pub title: String,
    /// Page body in the wiki's source markup.
    pub text: String,
    pub version: Option<u32>,
    pub author: Option<Author>,
    pub comments: Option<String>,
    pub parent: Option<ParentPage>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

/// Author of the latest page version.
#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

/// Reference to the parent of a child page.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentPage {
    pub title: String,
}
