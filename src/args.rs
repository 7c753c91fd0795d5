use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "partner-scout")]
#[command(about = "Scans seed domains for partner program pages")]
#[command(version)]
pub struct Args {
    /// File with seed URLs, one per line
    pub input: String,

    /// Output CSV path (defaults to partner_programs_<timestamp>.csv)
    #[arg(short, long)]
    pub output: Option<String>,

    /// URL for the WebDriver instance
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub page_timeout: u64,

    /// Readiness wait timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub ready_timeout: u64,
}
