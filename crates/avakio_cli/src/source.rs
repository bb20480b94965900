//! Chart configuration files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use avakio_charts::ChartConfig;

/// Load a chart configuration (`.toml` or `.json`).
pub fn load_chart(path: &Path) -> Result<ChartConfig> {
    if !path.exists() {
        anyhow::bail!("No chart configuration found at {}", path.display());
    }

    let config = ChartConfig::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        chart_type = ?config.chart_type,
        series = config.series.len(),
        "loaded chart configuration"
    );
    Ok(config)
}

/// Every chart configuration directly inside `dir`, sorted by file name.
pub fn chart_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .path();
        let is_config = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml") || e.eq_ignore_ascii_case("json"));
        if path.is_file() && is_config {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let err = load_chart(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }

    #[test]
    fn unsupported_extension_keeps_cause() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml.bak");
        assert!(load_chart(&path).is_err());

        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/lib.rs");
        let err = load_chart(&manifest).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported configuration file"));
    }
}
