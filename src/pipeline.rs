//! End-to-end processing of one wiki page.

use std::path::{Path, PathBuf};

use crate::api::{json_url, WikiClient};
use crate::context::ConversionContext;
use crate::convert::{convert_page, Converter};
use crate::error::Result;
use crate::fs::prepare_dir;
use crate::images::{harvest_images, HarvestReport, HarvestSettings};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Page title as returned by the wiki.
    pub title: String,
    pub context: ConversionContext,
    pub converted_file: PathBuf,
    pub images: HarvestReport,
}

/// Fetch, convert and harvest the page at `wiki_url` into `output_dir`.
///
/// Stages run strictly in order and the first failure ends the run. A
/// converted file written before a harvest failure is left in place.
pub async fn run(
    client: &WikiClient,
    converter: &dyn Converter,
    settings: &HarvestSettings,
    wiki_url: &str,
    output_dir: &Path,
) -> Result<RunReport> {
    let output_dir = prepare_dir(output_dir)?;

    let api_url = json_url(wiki_url);
    tracing::info!("Fetching wiki page from {}", api_url);
    let page = client.fetch_page(&api_url).await?;

    let context = ConversionContext::new(&page, wiki_url, &output_dir)?;
    tracing::debug!("Page '{}' maps to '{}'", page.title, context.unique_title());

    let converted_file = convert_page(
        converter,
        context.raw_text(),
        context.unique_title(),
        context.output_dir(),
    )
    .await?;

    let images = harvest_images(client, &context, settings).await?;

    Ok(RunReport {
        title: page.title,
        context,
        converted_file,
        images,
    })
}
