use fantoccini::error::CmdError;
use thiserror::Error;

/// Faults surfaced by a single fetch against the rendering engine.
///
/// `Timeout`, `NotFound`, `Stale` and `SessionLost` are transient: the
/// fetch as a whole can be retried. `Command` is everything else the
/// WebDriver reported and is treated as terminal for the attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A bounded wait elapsed before the condition was satisfied.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// An element whose presence was required is absent.
    #[error("element not found: {0}")]
    NotFound(String),

    /// The DOM mutated between locating an element and using it.
    #[error("stale element while reading {0}")]
    Stale(String),

    /// The underlying browser session was invalidated.
    #[error("webdriver session lost: {0}")]
    SessionLost(String),

    /// Any other WebDriver command failure.
    #[error("webdriver command failed: {0}")]
    Command(#[from] CmdError),
}

impl FetchError {
    /// Whether retrying the whole fetch can plausibly succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::Command(_))
    }

    /// Map a raw WebDriver error onto the fetch taxonomy.
    ///
    /// The wait-timeout and missing-element cases carry dedicated
    /// variants; session loss and staleness are recognised from the
    /// error message, which is the only form some drivers report
    /// them in.
    pub fn classify(err: CmdError, context: &str) -> FetchError {
        match err {
            CmdError::WaitTimeout => FetchError::Timeout(context.to_string()),
            _ if err.is_no_such_element() => FetchError::NotFound(context.to_string()),
            other => {
                let message = other.to_string();
                let lower = message.to_lowercase();
                if lower.contains("session") {
                    FetchError::SessionLost(message)
                } else if lower.contains("stale") {
                    FetchError::Stale(context.to_string())
                } else {
                    FetchError::Command(other)
                }
            }
        }
    }
}

/// Faults from the tabular stores. Logged by callers; a dropped record
/// or link batch never aborts the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults that end the harvest phase.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The results list never became ready despite refresh retries.
    /// This is the one case where pagination gives up entirely.
    #[error("results list never became ready after {0} attempts")]
    ResultsNeverReady(u32),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
