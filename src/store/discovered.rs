// store/discovered.rs — read-only loader for the Discovered Store
// (spec §3, §6). The snapshot is read once per run and cached in memory
// for the remainder of the run (spec §5); across runs, a cached snapshot
// is reused only while the file's modification time is unchanged.

use crate::model::{DiscoveredDocument, DiscoveredSnapshot};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::SystemTime;

fn cache() -> &'static Mutex<HashMap<PathBuf, (SystemTime, DiscoveredSnapshot)>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, (SystemTime, DiscoveredSnapshot)>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// 16-hex-char prefix of the SHA-256 of the file contents (spec §3).
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..8])
}

/// Load the Discovered document, memoized by `(path, mtime)` (spec §5).
pub async fn load(path: &Path) -> Result<DiscoveredSnapshot> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("discovered file not found: {}", path.display()))?;
    let mtime = metadata.modified().with_context(|| "file system does not report mtime")?;

    if let Some((cached_mtime, snapshot)) = cache().lock().unwrap().get(path) {
        if *cached_mtime == mtime {
            return Ok(snapshot.clone());
        }
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read discovered file {}", path.display()))?;
    let hash = content_hash(&bytes);
    let doc: DiscoveredDocument = serde_json::from_slice(&bytes)
        .with_context(|| format!("malformed discovered JSON in {}", path.display()))?;
    let snapshot = DiscoveredSnapshot::new(doc.entries, hash);

    cache().lock().unwrap().insert(path.to_path_buf(), (mtime, snapshot.clone()));
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn loads_and_hashes_a_minimal_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("discovered.json");
        tokio::fs::write(&path, br#"{"entries": []}"#).await.unwrap();
        let snapshot = load(&path).await.unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.content_hash.len(), 16);
    }

    #[tokio::test]
    async fn reuses_cache_while_mtime_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("discovered.json");
        tokio::fs::write(&path, br#"{"entries": []}"#).await.unwrap();
        let first = load(&path).await.unwrap();
        let second = load(&path).await.unwrap();
        assert_eq!(first.content_hash, second.content_hash);
    }

    #[tokio::test]
    async fn missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        assert!(load(&path).await.is_err());
    }
}
