// store/resolved.rs — atomic writer for the Resolved Store (spec §6).
// The whole document is regenerated every run and written via a
// temp-file-then-rename to avoid readers ever observing a partial file.

use crate::model::ResolvedDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub async fn write(path: &Path, document: &ResolvedDocument, pretty: bool) -> Result<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(document)
    } else {
        serde_json::to_vec(document)
    }
    .context("failed to serialize resolved document")?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &bytes)
        .await
        .with_context(|| format!("failed to write temp file {}", tmp_path.display()))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("failed to rename {} into place", path.display()))
}
