//! Pixel-space geometry.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rectangle spanning two corners in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::from_origin_size(self.origin.offset(dx, dy), self.size)
    }

    /// Shrink by independent amounts per side; never produces a negative size.
    pub fn inset_sides(&self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self::new(
            self.origin.x + left,
            self.origin.y + top,
            (self.size.width - left - right).max(0.0),
            (self.size.height - top - bottom).max(0.0),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_geometry() {
        let r = Rect::from_origin_size(Point::new(1.0, 2.0), Size::new(100.0, 50.0));
        assert_eq!(r.center(), Point::new(51.0, 27.0));
        assert!(r.contains(Point::new(50.0, 25.0)));
        assert!(!r.contains(Point::new(200.0, 100.0)));
        assert_eq!(r.right(), 101.0);
        assert_eq!(r.bottom(), 52.0);
    }

    #[test]
    fn inset_sides_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 40.0, 30.0).inset_sides(20.0, 30.0, 20.0, 30.0);
        assert_eq!(r.x(), 30.0);
        assert_eq!(r.y(), 20.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(10.0, 40.0), Point::new(4.0, 10.0));
        assert_eq!(r, Rect::new(4.0, 10.0, 6.0, 30.0));
    }

    #[test]
    fn size_emptiness() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(f32::NAN, 10.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }
}
