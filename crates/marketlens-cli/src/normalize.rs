//! `normalize` command: offline normalization of a saved upstream body.

use std::path::Path;

use anyhow::Context;
use marketlens_core::Product;

/// Reads `path`, normalizes it, and prints the canonical products as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON. A body in an
/// unknown layout is not an error; it prints an empty list.
pub(crate) fn run_normalize(path: &Path) -> anyhow::Result<()> {
    let products = normalize_file(path)?;
    tracing::info!(path = %path.display(), count = products.len(), "normalized upstream body");
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

pub(crate) fn normalize_file(path: &Path) -> anyhow::Result<Vec<Product>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(marketlens_upstream::normalize_value(&body))
}
