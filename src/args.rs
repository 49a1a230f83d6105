use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contract-harvest")]
#[command(about = "Two-phase scraper for procurement contract notices")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver endpoint to attach to
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Page through the search results collecting detail links
    Harvest,
    /// Visit harvested links and extract contract records
    Extract,
}
