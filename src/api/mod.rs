//! Wiki API module.
//!
//! This module provides:
//! - HTTP client for the Redmine wiki REST API
//! - Page HTML and image downloads
//! - API response types

pub mod client;
pub mod types;

pub use client::{json_url, WikiClient};
pub use types::{Author, ParentPage, WikiPage, WikiPageResponse};
