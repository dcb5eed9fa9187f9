//! wiki-transformer - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wiki_transformer::{
    api::WikiClient,
    cli::Args,
    config::{validate_config, validate_wiki_url, Config},
    convert::PandocConverter,
    error::{exit_codes, Result},
    images::HarvestSettings,
    output::{
        print_banner, print_config_summary, print_error_chain, print_info, print_run_summary,
        print_success,
    },
    pipeline,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error_chain(&e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    if !args.quiet {
        print_banner();
    }

    // Load configuration, then let flags override it
    let mut config = Config::resolve(args.config.as_deref())?;
    args.merge_into_config(&mut config);

    validate_config(&config)?;
    validate_wiki_url(&args.url)?;

    if !args.quiet {
        print_config_summary(
            &args.url,
            &args.output_dir.display().to_string(),
            &format!(
                "{} ({} -> {})",
                config.converter.program,
                config.converter.source_format,
                config.converter.target_format
            ),
        );
    }

    let client = WikiClient::new(&config.http, &args.url)?;
    let converter = PandocConverter::from_config(&config.converter);
    let settings = HarvestSettings::from_config(&config.images);

    if !args.quiet {
        print_info("Processing wiki page...");
    }

    let report = pipeline::run(&client, &converter, &settings, &args.url, &args.output_dir).await?;

    if !args.quiet {
        print_run_summary(&report);
    }
    print_success(&format!(
        "Wiki page converted to {}",
        report.converted_file.display()
    ));

    Ok(())
}
