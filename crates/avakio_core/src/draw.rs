//! Draw context abstraction.
//!
//! Chart renderers talk to a `DrawContext` only. Hosts plug in a GPU or canvas
//! backend, the SVG exporter implements it to serialize documents, and tests use
//! `RecordingContext` to inspect what was drawn.

use crate::geometry::{Point, Rect, Size};
use crate::paint::{Brush, Color, CornerRadius, Stroke};
use crate::path::Path;

/// Horizontal text alignment relative to the draw origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Vertical text alignment relative to the draw origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Hanging,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Rotation in degrees around the draw origin.
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            color: Color::BLACK,
            bold: false,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            rotation: 0.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

pub trait DrawContext {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush);

    fn fill_path(&mut self, path: &Path, brush: Brush);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush);

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush);

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Open a named group; groups nest and must be closed with `pop_group`.
    fn push_group(&mut self, name: &str);

    fn pop_group(&mut self);

    /// Backend text measurement, when available.
    fn measure_text(&mut self, _text: &str, _style: &TextStyle) -> Option<Size> {
        None
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke, brush: Brush) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = Path::new().move_to(first.x, first.y);
        for p in rest {
            path = path.line_to(p.x, p.y);
        }
        self.stroke_path(&path, stroke, brush);
    }
}

/// A recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        radius: CornerRadius,
        brush: Brush,
    },
    FillPath {
        path: Path,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
        brush: Brush,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    PushGroup(String),
    PopGroup,
}

/// Draw context that records commands instead of rasterizing.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded inside the first group named `name`, nested groups included.
    pub fn group(&self, name: &str) -> Option<&[DrawCommand]> {
        let start = self
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::PushGroup(n) if n == name))?;
        let mut depth = 0usize;
        for (i, cmd) in self.commands.iter().enumerate().skip(start) {
            match cmd {
                DrawCommand::PushGroup(_) => depth += 1,
                DrawCommand::PopGroup => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&self.commands[start + 1..i]);
                    }
                }
                _ => {}
            }
        }
        Some(&self.commands[start + 1..])
    }

    /// Text of every `DrawText` command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for RecordingContext {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, brush: Brush) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            radius,
            brush,
        });
    }

    fn fill_path(&mut self, path: &Path, brush: Brush) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            brush,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            brush,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke, brush: Brush) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
            brush,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn push_group(&mut self, name: &str) {
        self.commands.push(DrawCommand::PushGroup(name.to_string()));
    }

    fn pop_group(&mut self) {
        self.commands.push(DrawCommand::PopGroup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_becomes_single_stroke() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        ctx.stroke_polyline(
            &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)],
            &Stroke::new(2.0),
            Brush::Solid(Color::BLACK),
        );
        assert_eq!(ctx.commands().len(), 1);
        match &ctx.commands()[0] {
            DrawCommand::StrokePath { path, stroke, .. } => {
                assert_eq!(path.verbs().len(), 3);
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_polyline_draws_nothing() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        ctx.stroke_polyline(&[], &Stroke::new(1.0), Brush::Solid(Color::BLACK));
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn group_lookup_handles_nesting() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        ctx.push_group("outer");
        ctx.push_group("inner");
        ctx.fill_circle(Point::ZERO, 1.0, Brush::Solid(Color::WHITE));
        ctx.pop_group();
        ctx.draw_text("x", Point::ZERO, &TextStyle::new(10.0));
        ctx.pop_group();
        ctx.draw_text("after", Point::ZERO, &TextStyle::new(10.0));

        assert_eq!(ctx.group("outer").unwrap().len(), 4);
        assert_eq!(ctx.group("inner").unwrap().len(), 1);
        assert!(ctx.group("missing").is_none());
        assert_eq!(ctx.texts(), vec!["x", "after"]);
    }
}
