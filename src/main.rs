use clap::Parser;
use contract_harvest::config::ScrapeConfig;
use contract_harvest::harvest::{self, HarvestTuning, LinkHarvester};
use contract_harvest::pipeline::PipelineDriver;
use contract_harvest::progress::ProgressState;
use contract_harvest::retry::RetryPolicy;
use contract_harvest::session::Session;
use contract_harvest::store::{LinkStore, RecordStore};
use std::error::Error;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ScrapeConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                ::log::error!("Failed to load configuration from {:?}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => ScrapeConfig::default(),
    };
    if let Some(url) = args.webdriver_url {
        config.webdriver_url = url;
    }
    if args.headless {
        config.headless = true;
    }

    let result = match args.command {
        Command::Harvest => run_harvest(&config).await,
        Command::Extract => run_extract(&config).await,
    };

    if let Err(err) = result {
        ::log::error!("Run failed: {}", err);
        std::process::exit(1);
    }
}

/// Phase (a): collect detail links by paging through the search results.
async fn run_harvest(config: &ScrapeConfig) -> Result<(), Box<dyn Error>> {
    ::log::info!("Starting harvest against {}", config.start_url);
    let mut session = Session::connect(config).await?;

    session.goto(&config.start_url).await?;
    harvest::wait_for_operator();

    let store = LinkStore::new(&config.links_file);
    let harvester = LinkHarvester::new(&mut session, store, HarvestTuning::from(config));
    let outcome = harvester.run().await;

    session.close().await;

    let stats = outcome?;
    ::log::info!(
        "Harvest complete: {} pages visited, {} links collected",
        stats.pages,
        stats.links
    );
    Ok(())
}

/// Phase (b): visit each harvested link and extract its record.
async fn run_extract(config: &ScrapeConfig) -> Result<(), Box<dyn Error>> {
    let links = LinkStore::new(&config.links_file).load()?;
    if links.is_empty() {
        ::log::warn!("Link store {} is empty; nothing to do", config.links_file);
        return Ok(());
    }
    ::log::info!("Extracting {} links from {}", links.len(), config.links_file);

    let records = RecordStore::create(&config.records_file)?;
    let progress = ProgressState::load(&config.progress_file);
    let retry = RetryPolicy::new(config.max_retries, config.retry_backoff());

    let mut session = Session::connect(config).await?;
    let stats = {
        let mut driver = PipelineDriver::new(&mut session, records, progress, retry);
        driver.run(&links).await
    };
    session.close().await;

    ::log::info!(
        "Extraction complete: {} extracted, {} skipped, {} failed of {}",
        stats.extracted,
        stats.skipped,
        stats.failed,
        links.len()
    );
    Ok(())
}
