//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print an error followed by each of its causes.
pub fn print_error_chain(error: &dyn std::error::Error) {
    print_error(&error.to_string());
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("{} {}", style("Detail:").dim(), cause);
        source = cause.source();
    }
}

/// Print the application banner.
pub fn print_banner() {
    println!(
        "{} {}",
        style("wiki-transformer").cyan().bold(),
        style(env!("CARGO_PKG_VERSION")).dim()
    );
}

/// Print configuration summary.
pub fn print_config_summary(wiki_url: &str, output_dir: &str, converter: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Page:      {}", wiki_url);
    println!("  Directory: {}", output_dir);
    println!("  Converter: {}", converter);
    println!();
}
