use crate::site;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a scrape run, covering both phases.
///
/// Every field has a default matching the live site, so an empty `{}`
/// config file is a valid starting point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Search results page to start harvesting from
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Link store path (phase a output, phase b input)
    #[serde(default = "default_links_file")]
    pub links_file: String,

    /// Record store path (phase b output)
    #[serde(default = "default_records_file")]
    pub records_file: String,

    /// Resume sidecar recording links already extracted
    #[serde(default = "default_progress_file")]
    pub progress_file: String,

    /// Run the browser without a visible window. Off by default: the
    /// harvest phase needs a window for the operator to set filters in.
    #[serde(default)]
    pub headless: bool,

    /// Path to the Firefox binary, when not on the driver's PATH
    #[serde(default)]
    pub firefox_binary: Option<String>,

    /// Skip image loading for faster page renders
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Attempts per detail-page fetch before the link is skipped
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between fetch attempts, in seconds
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Bounded wait for a detail page's content, in seconds
    #[serde(default = "default_detail_wait_secs")]
    pub detail_wait_secs: u64,

    /// Pause after expanding the supplier block, in seconds
    #[serde(default = "default_supplier_settle_secs")]
    pub supplier_settle_secs: u64,

    /// Bounded wait for the results list, in seconds
    #[serde(default = "default_results_wait_secs")]
    pub results_wait_secs: u64,

    /// Refresh-and-retry attempts when the results list stays empty
    #[serde(default = "default_results_retries")]
    pub results_retries: u32,

    /// Pause after a refresh before re-checking the results list
    #[serde(default = "default_refresh_pause_secs")]
    pub refresh_pause_secs: u64,

    /// Bounded wait for the next-page control, in seconds
    #[serde(default = "default_next_wait_secs")]
    pub next_wait_secs: u64,

    /// Pause after clicking next, letting the page begin rendering
    #[serde(default = "default_page_pause_secs")]
    pub page_pause_secs: u64,

    /// Hard ceiling on pages visited, independent of the next control
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Flush the link store every this many pages
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        serde_json::from_str("{}").expect("empty config is valid")
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn detail_wait(&self) -> Duration {
        Duration::from_secs(self.detail_wait_secs)
    }

    pub fn supplier_settle(&self) -> Duration {
        Duration::from_secs(self.supplier_settle_secs)
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_start_url() -> String {
    site::START_URL.to_string()
}

fn default_links_file() -> String {
    "contract_links.csv".to_string()
}

fn default_records_file() -> String {
    "contract_details.csv".to_string()
}

fn default_progress_file() -> String {
    "progress.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    7
}

fn default_retry_backoff_secs() -> u64 {
    3
}

fn default_detail_wait_secs() -> u64 {
    10
}

fn default_supplier_settle_secs() -> u64 {
    1
}

fn default_results_wait_secs() -> u64 {
    30
}

fn default_results_retries() -> u32 {
    3
}

fn default_refresh_pause_secs() -> u64 {
    5
}

fn default_next_wait_secs() -> u64 {
    20
}

fn default_page_pause_secs() -> u64 {
    2
}

fn default_max_pages() -> u32 {
    556
}

fn default_checkpoint_interval() -> u32 {
    10
}
