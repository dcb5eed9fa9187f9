//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Run summary

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_error_chain, print_info, print_success,
};
pub use progress::create_item_bar;
pub use stats::print_run_summary;
