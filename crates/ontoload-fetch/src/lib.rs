//! Ontoload Fetch - Artifact fetching
//!
//! Ensures a local, decompressed copy of a named ontology's database file
//! exists, downloading and decompressing on demand. Every preparation is a
//! clean fetch: any prior per-ontology cache directory is removed first.

use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, info};

use ontoload_core::{FetchConfig, OntoloadError, Result};

/// Compressed artifact suffix on the remote source
const COMPRESSED_SUFFIX: &str = ".db.gz";

/// Artifact fetcher for precompiled ontology databases
pub struct Fetcher {
    client: reqwest::Client,
    cache_root: PathBuf,
    url_prefix: String,
}

impl Fetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_root: config.cache_root.clone(),
            url_prefix: config.url_prefix.clone(),
        }
    }

    /// Download URL for a named ontology
    pub fn artifact_url(&self, ontology: &str) -> String {
        format!("{}{}{}", self.url_prefix, ontology, COMPRESSED_SUFFIX)
    }

    /// Cache directory owned by a named ontology
    pub fn ontology_dir(&self, ontology: &str) -> PathBuf {
        self.cache_root.join(ontology)
    }

    /// Ensure a decompressed database file exists for the named ontology,
    /// returning its path.
    ///
    /// The ontology's cache directory is deleted and repopulated on every
    /// call; there are no merge or update semantics.
    pub async fn prepare(&self, ontology: &str) -> Result<PathBuf> {
        info!(ontology, "preparing ontology database");

        let dir = self.ontology_dir(ontology);
        reset_dir(&dir)?;

        let compressed = dir.join(format!("{ontology}{COMPRESSED_SUFFIX}"));
        let url = self.artifact_url(ontology);
        self.download(&url, &compressed).await?;

        let decompressed = dir.join(format!("{ontology}.db"));
        if !decompressed.exists() {
            debug!(src = %compressed.display(), dst = %decompressed.display(), "decompressing");
            decompress_gzip(&compressed, &decompressed)?;
        }

        info!(path = %decompressed.display(), "ontology database ready");
        Ok(decompressed)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url, dest = %dest.display(), "downloading artifact");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OntoloadError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(OntoloadError::Download {
                url: url.to_string(),
                reason: format!("HTTP status {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| OntoloadError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

/// Remove a directory and all its contents, then recreate it empty
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "removing existing cache directory");
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Decompress a gzip stream from `src` into `dest`
fn decompress_gzip(src: &Path, dest: &Path) -> Result<()> {
    let input = fs::File::open(src)?;
    let mut decoder = GzDecoder::new(BufReader::new(input));

    let mut buffer = Vec::new();
    decoder
        .read_to_end(&mut buffer)
        .map_err(|e| OntoloadError::Decompress {
            path: src.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut output = fs::File::create(dest)?;
    output.write_all(&buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn fetcher_at(root: &Path) -> Fetcher {
        Fetcher::new(&FetchConfig {
            cache_root: root.to_path_buf(),
            url_prefix: "https://s3.amazonaws.com/bbop-sqlite/".to_string(),
        })
    }

    fn write_gzip(path: &Path, payload: &[u8]) {
        let file = fs::File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap();
    }

    #[test]
    fn test_artifact_url() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = fetcher_at(tmp.path());
        assert_eq!(
            fetcher.artifact_url("envo"),
            "https://s3.amazonaws.com/bbop-sqlite/envo.db.gz"
        );
    }

    #[test]
    fn test_cache_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = fetcher_at(tmp.path());
        assert_eq!(fetcher.ontology_dir("envo"), tmp.path().join("envo"));
    }

    #[test]
    fn test_reset_dir_removes_prior_state() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("envo");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.db"), b"old").unwrap();

        reset_dir(&dir).unwrap();

        assert!(dir.exists());
        assert!(!dir.join("stale.db").exists());
    }

    #[test]
    fn test_decompress_gzip_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("envo.db.gz");
        let dest = tmp.path().join("envo.db");

        write_gzip(&src, b"sqlite payload");
        decompress_gzip(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"sqlite payload");
    }

    #[test]
    fn test_decompress_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("envo.db.gz");
        write_gzip(&src, b"sqlite payload");

        let first = tmp.path().join("first.db");
        let second = tmp.path().join("second.db");
        decompress_gzip(&src, &first).unwrap();
        decompress_gzip(&src, &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_decompress_rejects_malformed_stream() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("envo.db.gz");
        fs::write(&src, b"not a gzip stream").unwrap();

        let result = decompress_gzip(&src, &tmp.path().join("envo.db"));
        assert!(matches!(result, Err(OntoloadError::Decompress { .. })));
    }
}
