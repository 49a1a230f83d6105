use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Links whose records have already been extracted and durably appended.
///
/// A JSON sidecar next to the record store. The driver consults it before
/// fetching so that re-running against the same link store resumes where
/// the previous run stopped instead of re-appending every record. The
/// record store itself keeps its fixed 26-column schema; completion is
/// tracked here, keyed by link.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(skip)]
    path: PathBuf,
    completed: HashSet<String>,
}

impl ProgressState {
    /// Load the sidecar, starting fresh when it is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            ::log::info!("No progress file at {}; starting fresh", path.display());
            return Self {
                path,
                completed: HashSet::new(),
            };
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<ProgressState>(&content) {
                Ok(mut state) => {
                    state.path = path;
                    ::log::info!(
                        "Resumed previous session: {} links already extracted",
                        state.completed.len()
                    );
                    state
                }
                Err(err) => {
                    ::log::error!(
                        "Failed to parse {}: {}. Starting fresh.",
                        path.display(),
                        err
                    );
                    Self {
                        path,
                        completed: HashSet::new(),
                    }
                }
            },
            Err(err) => {
                ::log::error!("Failed to read {}: {}. Starting fresh.", path.display(), err);
                Self {
                    path,
                    completed: HashSet::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, link: &str) -> bool {
        self.completed.contains(link)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Record a link as done and persist immediately, so completion
    /// survives a crash between links.
    pub fn mark_complete(&mut self, link: String) {
        self.completed.insert(link);
        self.save();
    }

    fn save(&self) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                ::log::error!("Failed to serialize progress state: {}", err);
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            ::log::error!("Failed to write {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = ProgressState::load(dir.path().join("progress.json"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_mark_complete_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut state = ProgressState::load(&path);
        state.mark_complete("https://example.com/notice/1".into());
        state.mark_complete("https://example.com/notice/2".into());

        let reloaded = ProgressState::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://example.com/notice/1"));
        assert!(!reloaded.contains("https://example.com/notice/3"));
    }

    #[test]
    fn test_fresh_when_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "not json at all").unwrap();

        let state = ProgressState::load(&path);
        assert!(state.is_empty());
    }
}
