//! Fetch-once cache for the boundary dataset.

use std::fs;
use std::path::Path;

use super::MapError;

pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json";
pub const DATASET_PATH: &str = "countries.geo.json";

/// Where dataset bytes come from when the cache file is missing.
pub trait DatasetSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, MapError>;
}

/// Plain blocking HTTP GET.
pub struct HttpSource;

impl DatasetSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, MapError> {
        tracing::info!(url, "downloading boundary dataset");
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// File existed; no request made.
    Hit,
    /// File was downloaded and written.
    Downloaded,
}

/// Make sure `path` exists, downloading it from `url` if not. An existing
/// file is used as is, however old.
pub fn ensure_dataset(
    source: &dyn DatasetSource,
    url: &str,
    path: &Path,
) -> Result<CacheStatus, MapError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "boundary dataset cached");
        return Ok(CacheStatus::Hit);
    }

    let bytes = source.fetch(url)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "boundary dataset saved");
    Ok(CacheStatus::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<u32>,
    }

    impl DatasetSource for Counting {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, MapError> {
            self.calls.set(self.calls.get() + 1);
            Ok(br#"{"type":"FeatureCollection","features":[]}"#.to_vec())
        }
    }

    #[test]
    fn test_downloads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.geo.json");
        let source = Counting { calls: Cell::new(0) };

        assert_eq!(ensure_dataset(&source, DATASET_URL, &path).unwrap(), CacheStatus::Downloaded);
        assert_eq!(ensure_dataset(&source, DATASET_URL, &path).unwrap(), CacheStatus::Hit);
        assert_eq!(source.calls.get(), 1);
        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_never_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.geo.json");
        fs::write(&path, "stale").unwrap();
        let source = Counting { calls: Cell::new(0) };

        assert_eq!(ensure_dataset(&source, DATASET_URL, &path).unwrap(), CacheStatus::Hit);
        assert_eq!(source.calls.get(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "stale");
    }
}
