use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use listwrangle::{scrape_to_csv_with_options, ScrapeOptions};

#[derive(Parser)]
#[command(
    name = "listwrangle",
    about = "Extract product listings or quote blocks from a web page into CSV"
)]
struct Cli {
    /// Page URL to scrape (must start with http:// or https://)
    url: String,

    /// Output CSV file (a .csv extension is appended when missing)
    #[arg(short, long, default_value = "scraped_data.csv")]
    output: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value = "20")]
    timeout: u64,

    /// Stream the selector-probing narration while scraping
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The run log mirrors every line through tracing as it happens, so the
    // narration is visible even for runs that fail mid-fetch.
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let options = ScrapeOptions {
        timeout: Duration::from_secs(cli.timeout),
        ..ScrapeOptions::default()
    };

    let result = scrape_to_csv_with_options(&cli.url, &cli.output, &options)?;
    println!("{}", result.status);

    Ok(())
}
