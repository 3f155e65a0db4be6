// store/overrides.rs — read/write loader for the Overrides Store
// (spec §3, §6). Unlike the Discovered Store this one round-trips: the
// CLI's `check` flow can mark functions `checked` and persist that back.

use crate::model::OverridesDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub async fn load(path: &Path) -> Result<OverridesDocument> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("overrides file not found: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("malformed overrides JSON in {}", path.display()))
}

pub async fn save(path: &Path, document: &OverridesDocument) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(document).context("failed to serialize overrides document")?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write overrides file {}", path.display()))
}
