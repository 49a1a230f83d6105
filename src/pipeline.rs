use crate::error::FetchError;
use crate::extract::DetailPage;
use crate::progress::ProgressState;
use crate::retry::RetryPolicy;
use crate::store::RecordStore;

/// What the driver needs from the rendering engine for one detail page:
/// a fully-rendered source snapshot, supplier block disclosed. The seam
/// that lets the driver run against scripted fetches in tests.
#[allow(async_fn_in_trait)]
pub trait DetailFetcher {
    async fn detail_page_source(&mut self, url: &str) -> Result<String, FetchError>;
}

/// Counters reported when an extraction run finishes.
#[derive(Debug, Clone, Default)]
pub struct ExtractStats {
    /// Records extracted and durably appended this run
    pub extracted: usize,
    /// Links skipped because a previous run already extracted them
    pub skipped: usize,
    /// Links given up on after exhausting fetch retries, or whose
    /// record could not be persisted
    pub failed: usize,
}

/// Walks the harvested links, extracting and persisting one record per
/// visit. A single link's terminal failure never aborts the run.
pub struct PipelineDriver<'a, F: DetailFetcher> {
    fetcher: &'a mut F,
    records: RecordStore,
    progress: ProgressState,
    retry: RetryPolicy,
}

impl<'a, F: DetailFetcher> PipelineDriver<'a, F> {
    pub fn new(
        fetcher: &'a mut F,
        records: RecordStore,
        progress: ProgressState,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            fetcher,
            records,
            progress,
            retry,
        }
    }

    pub async fn run(&mut self, links: &[String]) -> ExtractStats {
        let total = links.len();
        let mut stats = ExtractStats::default();

        for (index, link) in links.iter().enumerate() {
            ::log::info!("Processing {}/{}: {}", index + 1, total, link);

            if self.progress.contains(link) {
                ::log::info!("Already extracted, skipping");
                stats.skipped += 1;
                continue;
            }

            let source = match self
                .retry
                .run(link, async |_| self.fetcher.detail_page_source(link).await)
                .await
            {
                Ok(source) => source,
                Err(err) => {
                    ::log::error!("Giving up on {}: {}", link, err);
                    stats.failed += 1;
                    continue;
                }
            };

            let record = DetailPage::parse(&source).record();
            if let Err(err) = self.records.append(&record) {
                // The record is dropped but the run goes on; the link
                // stays unmarked so a rerun picks it up again.
                ::log::error!("Failed to persist record for {}: {}", link, err);
                stats.failed += 1;
                continue;
            }
            ::log::info!("Saved: {}", record.title);
            self.progress.mark_complete(link.clone());
            stats.extracted += 1;
        }

        stats
    }
}
