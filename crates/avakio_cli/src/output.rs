//! Rendering chart configurations to files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use avakio_charts::{export, AvakioChart, ChartConfig, ImageFormat};
use avakio_core::Size;

/// Output file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Guess the format from an output path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => ImageFormat::Png.extension(),
            OutputFormat::Jpeg => ImageFormat::Jpeg.extension(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Overrides the configured container width.
    pub width: Option<f32>,
    /// Overrides the configured container height.
    pub height: Option<f32>,
}

/// Render `config` at its final animation state.
pub fn render_config(config: ChartConfig, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut chart = AvakioChart::new(config);
    let size = chart.size();
    chart.set_size(Size::new(
        options.width.unwrap_or(size.width),
        options.height.unwrap_or(size.height),
    ));
    if chart.size().is_empty() {
        anyhow::bail!(
            "Chart has no drawable area ({}x{})",
            chart.size().width,
            chart.size().height
        );
    }
    chart.refresh();

    let svg = chart.to_svg();
    let bytes = match options.format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => export::rasterize(&svg, ImageFormat::Png)?,
        OutputFormat::Jpeg => export::rasterize(&svg, ImageFormat::Jpeg)?,
    };
    Ok(bytes)
}

/// Load `input`, render it and write the result to `output`.
pub fn render_chart_file(input: &Path, output: &Path, options: &RenderOptions) -> Result<PathBuf> {
    let config = crate::source::load_chart(input)?;
    let bytes = render_config(config, options)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        bytes = bytes.len(),
        "rendered chart"
    );
    Ok(output.to_path_buf())
}
