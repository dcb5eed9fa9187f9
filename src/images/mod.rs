//! Image module.
//!
//! Finds the images a rendered wiki page references and stores them next to
//! the converted page.

pub mod extractor;
pub mod harvest;

pub use extractor::{extract_image_urls, fetch_image_urls, filter_thumbnails, THUMBNAIL_MARKER};
pub use harvest::{harvest_images, HarvestReport, HarvestSettings};
