use clap::Parser;
use partner_scout::Scout;
use partner_scout::config::FetcherConfig;
use partner_scout::export::CsvExporter;
use partner_scout::results::CrawlStatus;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let urls = match read_url_list(&args.input) {
        Ok(urls) => urls,
        Err(e) => {
            ::log::error!("Failed to read URL list from {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    if urls.is_empty() {
        ::log::error!("No URLs found in {}", args.input);
        std::process::exit(1);
    }

    ::log::info!("Found {} URLs to process", urls.len());

    println!("Note: Scanning requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default {}",
        args.webdriver_url
    );

    let config = FetcherConfig {
        webdriver_url: args.webdriver_url.clone(),
        page_load_timeout: args.page_timeout,
        ready_timeout: args.ready_timeout,
        ..FetcherConfig::default()
    };

    let output = args.output.clone().unwrap_or_else(default_output_path);

    let start_time = std::time::Instant::now();

    // Report progress after each seed URL finishes
    let mut on_progress = |completed: usize, total: usize| {
        ::log::info!("Progress: {}/{} URLs processed", completed, total);
    };

    let results = match Scout::new()
        .with_config(config)
        .run(&urls, &mut on_progress)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            ::log::error!("Failed to start scan: {}", e);
            std::process::exit(1);
        }
    };

    match CsvExporter::create(&output) {
        Ok(mut exporter) => {
            if let Err(e) = exporter.export_batch(&results) {
                ::log::error!("Failed to export results: {}", e);
            }
        }
        Err(e) => {
            ::log::error!("Failed to create output file {}: {}", output, e);
        }
    }

    let succeeded = results
        .iter()
        .filter(|r| matches!(r.status, CrawlStatus::Success))
        .count();
    let duration = start_time.elapsed();
    ::log::info!(
        "Scan complete - {} of {} URLs succeeded in {:.2} seconds, results in {}",
        succeeded,
        results.len(),
        duration.as_secs_f64(),
        output
    );
}

/// Reads seed URLs from a file, trimming whitespace and dropping blanks
///
/// A leading `url`/`urls` header line is dropped so one-column CSV exports
/// load cleanly.
fn read_url_list(path: &str) -> std::io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter(|line| !line.eq_ignore_ascii_case("url") && !line.eq_ignore_ascii_case("urls"))
        .map(|line| line.to_string())
        .collect())
}

/// Timestamped default output filename
fn default_output_path() -> String {
    format!(
        "partner_programs_{}.csv",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}
