//! Image harvesting for a converted page.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::api::WikiClient;
use crate::config::{CollisionPolicy, ImagesConfig};
use crate::context::ConversionContext;
use crate::error::{HarvestError, PathError};
use crate::fs::{check_writable, last_path_segment, suffixed_filename, unique_suffix};
use crate::images::extractor::{fetch_image_urls, filter_thumbnails};
use crate::output::create_item_bar;

/// Knobs for [`harvest_images`].
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub thumbnail_marker: String,
    pub collision_policy: CollisionPolicy,
    pub show_progress: bool,
}

impl HarvestSettings {
    pub fn from_config(config: &ImagesConfig) -> Self {
        Self {
            thumbnail_marker: config.thumbnail_marker.clone(),
            collision_policy: config.collision_policy,
            show_progress: config.show_progress,
        }
    }
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self::from_config(&ImagesConfig::default())
    }
}

/// What a harvest left on disk.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Image folder, `None` when the page had no images.
    pub directory: Option<PathBuf>,
    /// Saved files in download order.
    pub saved: Vec<PathBuf>,
    /// Images stored under a suffixed name to avoid a collision.
    pub renamed: usize,
    pub skipped_thumbnails: usize,
}

/// Download every non-thumbnail image of the page into its image folder.
///
/// Images are fetched one at a time in document order. A failure stops the
/// harvest; files saved before it stay on disk.
pub async fn harvest_images(
    client: &WikiClient,
    ctx: &ConversionContext,
    settings: &HarvestSettings,
) -> Result<HarvestReport, HarvestError> {
    let found = fetch_image_urls(client, ctx.source_url()).await?;
    let found_count = found.len();
    let urls = filter_thumbnails(found, &settings.thumbnail_marker);

    let mut report = HarvestReport {
        skipped_thumbnails: found_count - urls.len(),
        ..Default::default()
    };

    if urls.is_empty() {
        tracing::info!("No images found for page '{}'", ctx.unique_title());
        return Ok(report);
    }

    let dir = ctx.image_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| PathError::CreateFailed {
            path: dir.clone(),
            source,
        })?;
    check_writable(&dir)?;
    report.directory = Some(dir.clone());

    tracing::info!("Downloading {} images to {}", urls.len(), dir.display());

    let progress = settings
        .show_progress
        .then(|| create_item_bar(urls.len() as u64, "Images"));

    // file name -> URL it was saved from in this run
    let mut taken: HashMap<String, String> = HashMap::new();

    for url in &urls {
        let name = last_path_segment(url)
            .ok_or_else(|| HarvestError::InvalidImageUrl { url: url.clone() })?;

        let bytes = client
            .fetch_image_bytes(url)
            .await
            .map_err(|source| HarvestError::Download {
                url: url.clone(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(HarvestError::EmptyBody { url: url.clone() });
        }

        let (file_name, renamed) = resolve_name(&taken, name, url, settings.collision_policy)?;
        let path = dir.join(&file_name);

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| HarvestError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("Saved {} ({} bytes)", path.display(), bytes.len());

        if renamed {
            report.renamed += 1;
        }
        if taken.insert(file_name, url.clone()).is_none() {
            report.saved.push(path);
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(report)
}

/// Pick the file name for `url`, returning whether it was renamed.
fn resolve_name(
    taken: &HashMap<String, String>,
    name: String,
    url: &str,
    policy: CollisionPolicy,
) -> Result<(String, bool), HarvestError> {
    let previous = match taken.get(&name) {
        None => return Ok((name, false)),
        Some(previous) if previous == url => return Ok((name, false)),
        Some(previous) => previous,
    };

    match policy {
        CollisionPolicy::Overwrite => {
            tracing::warn!("Image {} replaces '{}' saved from {}", url, name, previous);
            Ok((name, false))
        }
        CollisionPolicy::Fail => Err(HarvestError::Collision {
            file_name: name,
            url: url.to_string(),
            previous: previous.clone(),
        }),
        CollisionPolicy::Suffix => {
            let renamed = suffixed_filename(&name, &unique_suffix(url));
            if let Some(other) = taken.get(&renamed) {
                // Already stored under this name earlier in the run
                if other == url {
                    return Ok((renamed, false));
                }
                return Err(HarvestError::Collision {
                    file_name: renamed,
                    url: url.to_string(),
                    previous: other.clone(),
                });
            }
            tracing::debug!("Image {} saved as '{}' to avoid a name collision", url, renamed);
            Ok((renamed, true))
        }
    }
}
