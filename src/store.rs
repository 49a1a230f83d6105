use crate::error::StoreError;
use crate::record::{ContractRecord, HEADERS};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Header of the single-column link store.
const LINKS_HEADER: &str = "Links";

/// Durable store of harvested result links.
///
/// A single-column CSV rewritten wholesale on every save: the harvester
/// checkpoints its entire accumulated set rather than diffing, which is
/// cheap at the target scale of tens of thousands of links.
#[derive(Debug)]
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the store from the full accumulated set.
    pub fn save(&self, links: &[String]) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record([LINKS_HEADER])?;
        for link in links {
            writer.write_record([link.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read the stored links back in order, suppressing duplicates left
    /// over from page re-reads. Dedup happens here, at read time, so the
    /// stored file stays a faithful log of what the harvester saw.
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let mut seen = HashSet::new();
        let mut links = Vec::new();
        let mut total = 0;
        for row in reader.records() {
            let row = row?;
            if let Some(url) = row.get(0) {
                if url.is_empty() {
                    continue;
                }
                total += 1;
                if seen.insert(url.to_string()) {
                    links.push(url.to_string());
                }
            }
        }
        if total > links.len() {
            ::log::debug!(
                "Suppressed {} duplicate links at read time",
                total - links.len()
            );
        }
        Ok(links)
    }
}

/// Append-only store of extracted contract records.
///
/// Each append opens the file, writes one row and flushes before
/// returning, so every record already persisted survives a crash of the
/// driver at any later link.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Open the store, creating it with a header-only file if absent.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            let mut writer = csv::Writer::from_path(&store.path)?;
            writer.write_record(HEADERS)?;
            writer.flush()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single durable row.
    pub fn append(&self, record: &ContractRecord) -> Result<(), StoreError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_title(title: &str) -> ContractRecord {
        ContractRecord {
            title: title.to_string(),
            ..ContractRecord::default()
        }
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_link_store_save_is_wholesale_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path().join("links.csv"));

        store
            .save(&["https://a".into(), "https://b".into(), "https://c".into()])
            .unwrap();
        assert_eq!(store.load().unwrap().len(), 3);

        // A later checkpoint with the full accumulated set replaces the
        // file rather than appending to it.
        store
            .save(&[
                "https://a".into(),
                "https://b".into(),
                "https://c".into(),
                "https://d".into(),
                "https://e".into(),
            ])
            .unwrap();
        assert_eq!(store.load().unwrap().len(), 5);
    }

    #[test]
    fn test_link_store_load_suppresses_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path().join("links.csv"));

        store
            .save(&[
                "https://a".into(),
                "https://b".into(),
                "https://a".into(),
                "https://c".into(),
                "https://b".into(),
            ])
            .unwrap();
        let links = store.load().unwrap();
        assert_eq!(links, vec!["https://a", "https://b", "https://c"]);
    }

    #[test]
    fn test_record_store_creates_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        RecordStore::create(&path).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 26);
        assert_eq!(headers.get(0), Some("Title"));
        assert_eq!(headers.get(25), Some("Supplier is VCSE?"));
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_record_store_append_is_durable_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");

        // Each append is visible to a fresh reader before the next one
        // begins, which is the crash-safety property the driver relies on.
        {
            let store = RecordStore::create(&path).unwrap();
            store.append(&record_with_title("First")).unwrap();
        }
        assert_eq!(read_rows(&path).len(), 1);

        {
            let store = RecordStore::create(&path).unwrap();
            store.append(&record_with_title("Second")).unwrap();
        }
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(0), Some("First"));
        assert_eq!(rows[1].get(0), Some("Second"));
    }

    #[test]
    fn test_record_store_reopen_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");

        let store = RecordStore::create(&path).unwrap();
        store.append(&record_with_title("Kept")).unwrap();

        // Re-creating against an existing file must not rewrite the header
        // or truncate rows already persisted.
        let reopened = RecordStore::create(&path).unwrap();
        reopened.append(&record_with_title("Added")).unwrap();
        assert_eq!(read_rows(&path).len(), 2);
    }
}
