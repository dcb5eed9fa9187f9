//! Run summary reporting.

use console::style;

use crate::pipeline::RunReport;

/// Print what a run produced.
pub fn print_run_summary(report: &RunReport) {
    let images = &report.images;

    println!();
    println!("{}", style(format!("Summary for '{}':", report.title)).bold());
    println!("  Converted file: {}", report.converted_file.display());
    match &images.directory {
        Some(dir) => println!("  Image folder:   {}", dir.display()),
        None => println!("  Image folder:   {}", style("none (no images)").dim()),
    }
    println!("  Images saved:   {}", style(images.saved.len()).green());
    if images.renamed > 0 {
        println!("  Renamed:        {}", style(images.renamed).yellow());
    }
    if images.skipped_thumbnails > 0 {
        println!("  Thumbnails:     {} skipped", images.skipped_thumbnails);
    }
}
