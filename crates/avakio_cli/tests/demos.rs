use std::path::PathBuf;

use avakio_charts::ChartType;
use avakio_cli::output::render_config;
use avakio_cli::{chart_files, load_chart, OutputFormat, RenderOptions};

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

#[test]
fn every_chart_type_has_a_demo() {
    let mut types: Vec<ChartType> = chart_files(&demos_dir())
        .unwrap()
        .iter()
        .map(|path| load_chart(path).unwrap().chart_type)
        .collect();
    types.sort_by_key(|t| format!("{t:?}"));
    types.dedup();
    assert_eq!(types.len(), 13);
}

#[test]
fn demos_load_without_warnings() {
    for path in chart_files(&demos_dir()).unwrap() {
        let config = load_chart(&path).unwrap();
        let warnings = config.diagnostics();
        assert!(warnings.is_empty(), "{}: {:?}", path.display(), warnings);
    }
}

#[test]
fn demos_render_to_svg() {
    for path in chart_files(&demos_dir()).unwrap() {
        let config = load_chart(&path).unwrap();
        let title = config.title.clone();
        let bytes = render_config(config, &RenderOptions::default()).unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert!(svg.starts_with("<svg"), "{}", path.display());
        assert!(svg.contains(r#"<g class="series:"#), "{}", path.display());
        if let Some(title) = title {
            assert!(svg.contains(&title), "{}", path.display());
        }
    }
}

#[test]
fn demos_rasterize() {
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
    for path in chart_files(&demos_dir()).unwrap() {
        let options = RenderOptions {
            format: OutputFormat::Png,
            width: Some(300.0),
            height: Some(200.0),
        };
        let bytes = render_config(load_chart(&path).unwrap(), &options).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC), "{}", path.display());
    }
}
