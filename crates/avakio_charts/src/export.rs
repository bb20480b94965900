//! SVG serialization and raster export.
//!
//! [`SvgContext`] records draw calls as an SVG document. [`rasterize`] turns a
//! document into PNG or JPEG bytes with `usvg`/`resvg`, and [`data_url`] wraps
//! the bytes for hosts that expect `data:` URLs.

use std::fmt::Write as _;
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use avakio_core::{
    Brush, Color, CornerRadius, DrawContext, Path, Point, Rect, Size, Stroke, TextAnchor,
    TextBaseline, TextStyle,
};
use base64::Engine as _;
use image::{ImageFormat as RasterFormat, RgbaImage};

use crate::error::ExportError;

static FONT_DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

fn font_db() -> Arc<usvg::fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Raster export formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Rasterize an SVG document at its intrinsic size.
pub fn rasterize(svg: &str, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    let opts = usvg::Options {
        fontdb: font_db(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)?;
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Pixmap { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha.
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let image =
        RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::Pixmap { width, height })?;

    let mut out = Cursor::new(Vec::new());
    match format {
        ImageFormat::Png => image.write_to(&mut out, RasterFormat::Png)?,
        ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgba8(image)
                .to_rgb8()
                .write_to(&mut out, RasterFormat::Jpeg)?;
        }
    }
    Ok(out.into_inner())
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(format: ImageFormat, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// [`DrawContext`] that serializes draw calls into an SVG document.
#[derive(Debug)]
pub struct SvgContext {
    size: Size,
    body: String,
    defs: String,
    gradients: usize,
    depth: usize,
}

impl SvgContext {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
            defs: String::new(),
            gradients: 0,
            depth: 0,
        }
    }

    /// Close any open groups and return the document.
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.pop_group();
        }
        let (w, h) = (num(self.size.width), num(self.size.height));
        let mut out = String::with_capacity(self.body.len() + self.defs.len() + 160);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>");
            out.push_str(&self.defs);
            out.push_str("</defs>");
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    /// `fill="..."` / `stroke="..."` attributes for a brush.
    fn paint(&mut self, attr: &str, brush: &Brush) -> String {
        match brush {
            Brush::Solid(color) => solid(attr, *color),
            Brush::Gradient(g) => {
                self.gradients += 1;
                let id = format!("g{}", self.gradients);
                let _ = write!(
                    self.defs,
                    r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    num(g.start.x),
                    num(g.start.y),
                    num(g.end.x),
                    num(g.end.y)
                );
                for stop in &g.stops {
                    let _ = write!(
                        self.defs,
                        r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                        num(stop.offset),
                        stop.color.to_hex_rgb(),
                        num(stop.color.a)
                    );
                }
                self.defs.push_str("</linearGradient>");
                format!(r#"{attr}="url(#{id})""#)
            }
        }
    }

    fn fill_d(&mut self, d: &str, brush: &Brush) {
        let fill = self.paint("fill", brush);
        let _ = write!(self.body, r#"<path d="{d}" {fill}/>"#);
    }
}

fn solid(attr: &str, color: Color) -> String {
    if color.a >= 1.0 {
        format!(r#"{attr}="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#"{attr}="{}" {attr}-opacity="{}""#,
            color.to_hex_rgb(),
            num(color.a)
        )
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut s = format!(r#" stroke-width="{}""#, num(stroke.width));
    if !stroke.dash.is_empty() {
        let dash: Vec<String> = stroke.dash.iter().map(|d| num(*d)).collect();
        let _ = write!(s, r#" stroke-dasharray="{}""#, dash.join(" "));
    }
    s
}

fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

impl DrawContext for SvgContext {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush) {
        if rect.is_empty() {
            return;
        }
        if radius.is_zero() {
            let fill = self.paint("fill", &brush);
            let _ = write!(
                self.body,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {fill}/>"#,
                num(rect.x()),
                num(rect.y()),
                num(rect.width()),
                num(rect.height())
            );
        } else {
            let d = Path::rounded_rect(rect, radius).to_svg_data();
            self.fill_d(&d, &brush);
        }
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        if path.is_empty() {
            return;
        }
        self.fill_d(&path.to_svg_data(), &brush);
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        if path.is_empty() {
            return;
        }
        let paint = self.paint("stroke", &brush);
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" {paint}{} stroke-linejoin="round" stroke-linecap="round"/>"#,
            path.to_svg_data(),
            stroke_attrs(stroke)
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        let fill = self.paint("fill", &brush);
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" {fill}/>"#,
            num(center.x),
            num(center.y),
            num(radius)
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush) {
        let paint = self.paint("stroke", &brush);
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" {paint}{}/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            stroke_attrs(stroke)
        );
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let baseline = match style.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "central",
            TextBaseline::Hanging => "hanging",
        };
        let (x, y) = (num(origin.x), num(origin.y));
        let _ = write!(
            self.body,
            r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{}" text-anchor="{anchor}" dominant-baseline="{baseline}" {}"#,
            num(style.size),
            solid("fill", style.color)
        );
        if style.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if style.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {x} {y})""#,
                num(style.rotation)
            );
        }
        let _ = write!(self.body, ">{}</text>", escape(text));
    }

    fn push_group(&mut self, name: &str) {
        self.depth += 1;
        let _ = write!(self.body, r#"<g class="{}">"#, escape(name));
    }

    fn pop_group(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        self.body.push_str("</g>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avakio_core::{Gradient, GradientStop};

    #[test]
    fn document_wraps_body_and_defs() {
        let mut ctx = SvgContext::new(Size::new(100.0, 50.0));
        ctx.push_group("series:a & b");
        ctx.fill_rect(
            Rect::new(0.0, 0.0, 10.0, 20.0),
            CornerRadius::ZERO,
            Brush::Gradient(Gradient {
                start: Point::new(0.0, 0.0),
                end: Point::new(0.0, 20.0),
                stops: vec![
                    GradientStop::new(0.0, Color::BLACK),
                    GradientStop::new(1.0, Color::WHITE.with_alpha(0.5)),
                ],
            }),
        );
        ctx.draw_text("1 < 2", Point::new(5.0, 5.0), &TextStyle::new(12.0));
        let svg = ctx.finish();

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
        assert!(svg.contains(r#"<defs><linearGradient id="g1""#));
        assert!(svg.contains(r#"fill="url(#g1)""#));
        assert!(svg.contains(r#"<g class="series:a &amp; b">"#));
        assert!(svg.contains("1 &lt; 2</text></g></svg>"));
    }

    #[test]
    fn translucent_fill_emits_opacity() {
        assert_eq!(
            solid("fill", Color::BLACK.with_alpha(0.25)),
            r##"fill="#000000" fill-opacity="0.25""##
        );
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(12.50), "12.5");
    }

    #[test]
    fn data_url_prefix() {
        assert_eq!(data_url(ImageFormat::Png, &[1, 2, 3]), "data:image/png;base64,AQID");
        assert!(data_url(ImageFormat::Jpeg, &[]).starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn rasterize_png_and_jpeg() {
        let mut ctx = SvgContext::new(Size::new(8.0, 4.0));
        ctx.fill_rect(
            Rect::new(0.0, 0.0, 8.0, 4.0),
            CornerRadius::ZERO,
            Brush::Solid(Color::rgb(1.0, 0.0, 0.0)),
        );
        let svg = ctx.finish();

        let png = rasterize(&svg, ImageFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let jpeg = rasterize(&svg, ImageFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn rasterize_rejects_garbage() {
        assert!(matches!(
            rasterize("not svg", ImageFormat::Png),
            Err(ExportError::Svg(_))
        ));
    }
}
