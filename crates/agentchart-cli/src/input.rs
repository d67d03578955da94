// File: crates/agentchart-cli/src/input.rs
// Summary: Offline input: JSON arrays or CSV files (`x,y[,group]`) in the wire record shape.

use std::path::Path;

use agentchart_core::{DataPoint, GroupedDataPoint};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if is_csv(path) {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        rdr.deserialize::<T>()
            .enumerate()
            .map(|(i, rec)| rec.with_context(|| format!("{} row {}", path.display(), i + 1)))
            .collect()
    } else {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("{} is not a JSON array of records", path.display()))
    }
}

/// Points for the single-series chart. An empty `y` cell reads as missing.
pub fn load_series(path: &Path) -> Result<Vec<DataPoint>> {
    load(path)
}

/// Rows for the stacked chart; every row needs a `group`.
pub fn load_grouped(path: &Path) -> Result<Vec<GroupedDataPoint>> {
    load(path)
}
