use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a chart configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML chart configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON chart configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported configuration file `{0}` (expected .toml or .json)")]
    UnsupportedExtension(PathBuf),
}

/// Failure to rasterize a chart.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export a {width}x{height} chart before layout")]
    EmptyCanvas { width: f32, height: f32 },

    #[error("invalid SVG document: {0}")]
    Svg(#[from] usvg::Error),

    #[error("failed to allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("raster task failed: {0}")]
    Task(String),
}
