use crate::config::ScrapeConfig;
use crate::error::{FetchError, HarvestError};
use crate::store::LinkStore;
use std::time::Duration;
use url::Url;

/// What the harvester needs from a live search-results page.
///
/// The one seam between the pagination loop and the rendering engine,
/// so the loop itself can be driven by a scripted page in tests.
#[allow(async_fn_in_trait)]
pub trait SearchPage {
    /// Block until the results list is present or `wait` elapses.
    async fn await_results(&mut self, wait: Duration) -> Result<(), FetchError>;

    /// Reload the current page.
    async fn refresh(&mut self) -> Result<(), FetchError>;

    /// Hrefs of all result links currently present.
    async fn read_links(&mut self) -> Result<Vec<String>, FetchError>;

    /// Click the next-page control if it is present and clickable within
    /// `wait`. `Ok(false)` means the result set is exhausted.
    async fn next_page(&mut self, wait: Duration) -> Result<bool, FetchError>;
}

/// Timing and bounds for one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestTuning {
    pub results_wait: Duration,
    pub results_retries: u32,
    pub refresh_pause: Duration,
    pub next_wait: Duration,
    pub page_pause: Duration,
    pub max_pages: u32,
    pub checkpoint_interval: u32,
}

impl Default for HarvestTuning {
    fn default() -> Self {
        Self::from(&ScrapeConfig::default())
    }
}

impl From<&ScrapeConfig> for HarvestTuning {
    fn from(config: &ScrapeConfig) -> Self {
        Self {
            results_wait: Duration::from_secs(config.results_wait_secs),
            results_retries: config.results_retries,
            refresh_pause: Duration::from_secs(config.refresh_pause_secs),
            next_wait: Duration::from_secs(config.next_wait_secs),
            page_pause: Duration::from_secs(config.page_pause_secs),
            max_pages: config.max_pages,
            checkpoint_interval: config.checkpoint_interval.max(1),
        }
    }
}

/// Counters reported when a harvest finishes.
#[derive(Debug, Clone, Default)]
pub struct HarvestStats {
    /// Pages visited before the loop ended
    pub pages: u32,
    /// Links accumulated, including duplicates from page re-reads
    pub links: usize,
    /// Link-store flushes performed (checkpoints plus the final save)
    pub saves: u32,
}

/// Drives pagination over the search results, accumulating links and
/// checkpointing them to the link store.
pub struct LinkHarvester<'a, P: SearchPage> {
    page: &'a mut P,
    store: LinkStore,
    tuning: HarvestTuning,
    links: Vec<String>,
    stats: HarvestStats,
}

impl<'a, P: SearchPage> LinkHarvester<'a, P> {
    pub fn new(page: &'a mut P, store: LinkStore, tuning: HarvestTuning) -> Self {
        Self {
            page,
            store,
            tuning,
            links: Vec::new(),
            stats: HarvestStats::default(),
        }
    }

    /// Run the paging loop to completion.
    ///
    /// The accumulated set is flushed exactly once more after the loop
    /// ends, on the error path as much as the normal one, so a harvest
    /// that dies mid-run still keeps everything it collected.
    pub async fn run(mut self) -> Result<HarvestStats, HarvestError> {
        let outcome = self.paging_loop().await;
        self.flush();
        self.stats.links = self.links.len();
        match outcome {
            Ok(()) => {
                ::log::info!(
                    "Harvest finished: {} pages, {} links, {} saves",
                    self.stats.pages,
                    self.stats.links,
                    self.stats.saves
                );
                Ok(self.stats)
            }
            Err(err) => {
                ::log::error!("Harvest aborted after {} pages: {}", self.stats.pages, err);
                Err(err)
            }
        }
    }

    async fn paging_loop(&mut self) -> Result<(), HarvestError> {
        let mut page_count: u32 = 1;
        while page_count <= self.tuning.max_pages {
            self.await_results_with_refresh().await?;

            let links = self.read_links_tolerant().await?;
            ::log::info!("Page {}: collected {} links", page_count, links.len());
            self.append_links(links);
            self.stats.pages = page_count;

            if page_count % self.tuning.checkpoint_interval == 0 {
                self.flush();
                ::log::info!("Saved interim progress at page {}", page_count);
            }

            if !self.page.next_page(self.tuning.next_wait).await? {
                ::log::info!("No more pages found");
                return Ok(());
            }
            page_count += 1;
            tokio::time::sleep(self.tuning.page_pause).await;
        }
        ::log::info!("Page ceiling of {} reached", self.tuning.max_pages);
        Ok(())
    }

    /// Wait for the results list, refreshing between bounded waits. The
    /// results list never turning up is the one fault that aborts the
    /// harvest instead of skipping.
    async fn await_results_with_refresh(&mut self) -> Result<(), HarvestError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.page.await_results(self.tuning.results_wait).await {
                Ok(()) => return Ok(()),
                Err(err) if !err.is_transient() => return Err(err.into()),
                Err(err) => {
                    ::log::warn!(
                        "Results list not ready, retrying ({}/{}): {}",
                        attempt,
                        self.tuning.results_retries,
                        err
                    );
                    if attempt >= self.tuning.results_retries {
                        return Err(HarvestError::ResultsNeverReady(attempt));
                    }
                    self.page.refresh().await.map_err(HarvestError::Fetch)?;
                    tokio::time::sleep(self.tuning.refresh_pause).await;
                }
            }
        }
    }

    /// Read the current page's links, re-issuing the whole read once if
    /// the DOM mutated under the first one.
    async fn read_links_tolerant(&mut self) -> Result<Vec<String>, HarvestError> {
        match self.page.read_links().await {
            Ok(links) => Ok(links),
            Err(FetchError::Stale(_)) => {
                ::log::warn!("A stale element was encountered, re-fetching links");
                self.page.read_links().await.map_err(HarvestError::Fetch)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Accumulate links in page order. Anything that is not a URL is
    /// noise from the markup and dropped; duplicates are kept, since the
    /// link store's reader suppresses them.
    fn append_links(&mut self, links: Vec<String>) {
        for link in links {
            if Url::parse(&link).is_ok() {
                self.links.push(link);
            } else {
                ::log::debug!("Ignoring non-URL href: {}", link);
            }
        }
    }

    fn flush(&mut self) {
        match self.store.save(&self.links) {
            Ok(()) => {
                self.stats.saves += 1;
                ::log::info!(
                    "Saved {} links to {}",
                    self.links.len(),
                    self.store.path().display()
                );
            }
            Err(err) => {
                // A failed checkpoint loses at most the interval's worth
                // of links; the harvest keeps paging.
                ::log::error!("Failed to save link store: {}", err);
            }
        }
    }
}

/// Block until the operator confirms the search filters are in place.
/// Models the out-of-band configuration step done through the browser
/// window itself.
pub fn wait_for_operator() {
    println!("Perform your search and apply filters. Press Enter when ready to scrape...");
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        ::log::warn!("Could not read operator confirmation; continuing");
    }
}
