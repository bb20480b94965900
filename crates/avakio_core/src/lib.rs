//! Avakio Core
//!
//! Renderer-agnostic drawing primitives shared by the Avakio crates:
//!
//! - **Geometry**: `Point`, `Size`, `Rect`
//! - **Paint**: `Color`, `Brush`, `Gradient`, `Stroke`, `CornerRadius`
//! - **Paths**: a small builder producing SVG path data and flattened outlines
//! - **Drawing**: the `DrawContext` trait and a `RecordingContext` that keeps
//!   every command for inspection or replay
//!
//! # Example
//!
//! ```rust
//! use avakio_core::{Brush, Color, DrawContext, Path, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
//! let path = Path::new().move_to(0.0, 0.0).line_to(50.0, 50.0).close();
//! ctx.fill_path(&path, Brush::Solid(Color::from_hex(0x1CA1C1)));
//! assert_eq!(ctx.commands().len(), 1);
//! ```

pub mod draw;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod path;

pub use draw::{DrawCommand, DrawContext, RecordingContext, TextAnchor, TextBaseline, TextStyle};
pub use error::ColorParseError;
pub use geometry::{Point, Rect, Size};
pub use paint::{Brush, Color, CornerRadius, Gradient, GradientStop, Stroke};
pub use path::{Path, PathVerb};
