//! Filesystem module.
//!
//! Provides:
//! - Filename sanitizing and deterministic naming
//! - Output directory preparation and write probing

pub mod naming;
pub mod paths;

pub use naming::{
    last_path_segment, sanitize_filename, suffixed_filename, unique_suffix, unique_title,
};
pub use paths::{check_writable, converted_file_path, image_dir, prepare_dir};
