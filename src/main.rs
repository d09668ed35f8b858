use clap::Parser;
use imdb_top_scrape::output::{render_json, render_table};
use imdb_top_scrape::{DetailExtractor, HttpSource, OutputFormat, ScrapeConfig, scrape};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the table.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ScrapeConfig::parse();

    let source = HttpSource::new(&config)?;
    let extractor = DetailExtractor::new(config.base_url()?)?;

    let report = scrape(&source, &extractor, &config).await?;
    for (kind, count) in report.failure_counts() {
        tracing::warn!(%kind, count, "movies skipped");
    }

    match config.format {
        OutputFormat::Table => print!("{}", render_table(&report.records, config.max_cell_width)),
        OutputFormat::Json => println!("{}", render_json(&report.records)?),
    }

    Ok(())
}
