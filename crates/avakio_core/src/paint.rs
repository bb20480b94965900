//! Colors, brushes and strokes.

use crate::error::ColorParseError;
use crate::geometry::Point;

/// RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)`, `white`, `black` or `transparent`.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args).ok_or_else(|| ColorParseError::InvalidFunction(s.to_string()));
        }

        match lower.as_str() {
            "white" => Ok(Self::WHITE),
            "black" => Ok(Self::BLACK),
            "transparent" => Ok(Self::TRANSPARENT),
            _ => Err(ColorParseError::Unsupported(s.to_string())),
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Scale the RGB channels toward black by `amount` (`0.0..=1.0`).
    pub fn darken(self, amount: f32) -> Self {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self::rgba(self.r * k, self.g * k, self.b * k, self.a)
    }

    /// Move the RGB channels toward white by `amount` (`0.0..=1.0`).
    pub fn lighten(self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (1.0 - self.r) * t,
            self.g + (1.0 - self.g) * t,
            self.b + (1.0 - self.b) * t,
            self.a,
        )
    }

    /// `#rrggbb` without alpha.
    pub fn to_hex_rgb(&self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        3 => {
            let expand = |i: usize| {
                let d = &hex[i..i + 1];
                channel(&format!("{d}{d}"))
            };
            Some(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some(Color::rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => Some(Color::rgba(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<f32> = args
        .split(',')
        .map(|p| p.trim().parse::<f32>().ok())
        .collect::<Option<Vec<_>>>()?;
    let byte = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(byte(*r), byte(*g), byte(*b))),
        [r, g, b, a] => Some(Color::rgba(byte(*r), byte(*g), byte(*b), a.clamp(0.0, 1.0))),
        _ => None,
    }
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient in user space.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<GradientStop>,
}

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl Brush {
    /// Representative color (first stop for gradients).
    pub fn base_color(&self) -> Color {
        match self {
            Brush::Solid(c) => *c,
            Brush::Gradient(g) => g.stops.first().map(|s| s.color).unwrap_or_default(),
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

/// Stroke parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            dash: Vec::new(),
        }
    }

    pub fn with_dash(mut self, dash: &[f32]) -> Self {
        self.dash = dash.to_vec();
        self
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Rounded top edge only (vertical bars).
    pub fn top(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            ..Self::ZERO
        }
    }

    /// Rounded right edge only (horizontal bars).
    pub fn right(radius: f32) -> Self {
        Self {
            top_right: radius,
            bottom_right: radius,
            ..Self::ZERO
        }
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|r| *r <= 0.0)
    }

    /// Clamp every radius so it fits a `width` x `height` box.
    pub fn fit(&self, width: f32, height: f32) -> Self {
        let max = (width.min(height) * 0.5).max(0.0);
        Self {
            top_left: self.top_left.clamp(0.0, max),
            top_right: self.top_right.clamp(0.0, max),
            bottom_right: self.bottom_right.clamp(0.0, max),
            bottom_left: self.bottom_left.clamp(0.0, max),
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}
