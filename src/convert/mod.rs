//! Markup conversion through an external converter.
//!
//! [`convert_page`] owns the temporary-file protocol: the page text is
//! written to a scratch file, the [`Converter`] turns it into the output
//! file, and the scratch file is removed whatever the outcome.

pub mod pandoc;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ConvertError;

pub use pandoc::PandocConverter;

/// Prefix of the temporary input file.
const TEMP_INPUT_PREFIX: &str = "wiki_input";

/// A tool that turns one markup file into another.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert `input` and write the result to `output`.
    async fn convert(&self, input: &Path, output: &Path) -> Result<(), ConvertError>;

    /// Extension for the temporary input file, without the dot.
    fn source_extension(&self) -> &str;

    /// Extension of the converted file, without the dot.
    fn target_extension(&self) -> &str;
}

/// Convert `source_text` into `output_dir/<output_base_name>.<target extension>`.
///
/// Returns the path of the converted file.
pub async fn convert_page(
    converter: &dyn Converter,
    source_text: &str,
    output_base_name: &str,
    output_dir: &Path,
) -> Result<PathBuf, ConvertError> {
    convert_page_in(
        converter,
        source_text,
        output_base_name,
        output_dir,
        &std::env::temp_dir(),
    )
    .await
}

/// [`convert_page`] with the scratch file placed in `scratch_dir`.
async fn convert_page_in(
    converter: &dyn Converter,
    source_text: &str,
    output_base_name: &str,
    output_dir: &Path,
    scratch_dir: &Path,
) -> Result<PathBuf, ConvertError> {
    let temp_path = scratch_dir.join(format!(
        "{}_{}.{}",
        TEMP_INPUT_PREFIX,
        Uuid::new_v4(),
        converter.source_extension()
    ));

    let result = match tokio::fs::write(&temp_path, source_text).await {
        Ok(()) => run_converter(converter, &temp_path, output_base_name, output_dir).await,
        Err(source) => Err(ConvertError::TempWriteFailed {
            path: temp_path.clone(),
            source,
        }),
    };

    let cleanup = remove_temp_file(&temp_path).await;

    match (result, cleanup) {
        (Ok(output), Ok(())) => {
            tracing::info!("Converted wiki page to {}", output.display());
            Ok(output)
        }
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            tracing::warn!("{}", cleanup_err);
            Err(e)
        }
    }
}

async fn run_converter(
    converter: &dyn Converter,
    input: &Path,
    output_base_name: &str,
    output_dir: &Path,
) -> Result<PathBuf, ConvertError> {
    let output = output_path(output_base_name, output_dir, converter.target_extension())?;
    converter.convert(input, &output).await?;
    Ok(output)
}

/// Destination of the converted file.
fn output_path(
    base_name: &str,
    output_dir: &Path,
    extension: &str,
) -> Result<PathBuf, ConvertError> {
    let invalid = |reason: &str| ConvertError::InvalidOutputPath {
        name: base_name.to_string(),
        dir: output_dir.to_path_buf(),
        reason: reason.to_string(),
    };

    if base_name.trim().is_empty() {
        return Err(invalid("file name is empty"));
    }
    if base_name.contains(['/', '\\', '\0']) || base_name == "." || base_name == ".." {
        return Err(invalid("file name must not contain path components"));
    }
    if extension.is_empty() {
        return Err(invalid("target extension is empty"));
    }

    Ok(output_dir.join(format!("{}.{}", base_name, extension)))
}

/// Remove the temporary input file; a file that is already gone is fine.
async fn remove_temp_file(path: &Path) -> Result<(), ConvertError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConvertError::TempCleanupFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}
