use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One entry of the detector's JSON output. Unknown fields are
/// ignored; a missing `detected` field counts as not protected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WafRecord {
    pub url: String,
    #[serde(default)]
    pub detected: bool,
}

/// Read the detector output, keep the URLs with no protection
/// detected, log them, and persist one per line. Returns how many URLs
/// were written; zero means no file was produced.
pub fn extract_unprotected(json_path: &Path, output_path: &Path) -> Result<usize> {
    let data = fs::read_to_string(json_path)
        .with_context(|| format!("cannot read {}", json_path.display()))?;
    let records: Vec<WafRecord> = serde_json::from_str(&data)
        .with_context(|| format!("invalid JSON in {}", json_path.display()))?;

    let unprotected: Vec<&str> = records
        .iter()
        .filter(|r| !r.detected)
        .map(|r| r.url.as_str())
        .collect();

    if unprotected.is_empty() {
        tracing::warn!("no domains without WAF found");
        return Ok(0);
    }

    tracing::info!("=== Domains without WAF ===");
    for url in &unprotected {
        tracing::info!("{url} (no WAF detected)");
    }

    fs::write(output_path, unprotected.join("\n") + "\n")
        .with_context(|| format!("cannot write {}", output_path.display()))?;
    tracing::info!("saved {} domain(s) to {}", unprotected.len(), output_path.display());
    Ok(unprotected.len())
}
