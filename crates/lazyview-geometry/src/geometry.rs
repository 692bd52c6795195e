//! Geometric primitives: Point, Size, Rect, Edges

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// True when both dimensions are finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        is_usable_dimension(self.width) && is_usable_dimension(self.height)
    }
}

/// A host-reported dimension is usable when it is finite and positive.
///
/// Hosts report a missing `innerHeight` as zero, NaN or nothing at all; all of
/// those mean "ask the secondary query instead".
pub fn is_usable_dimension(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The four edges of an axis-aligned region, in page coordinates.
///
/// For a container this is its visible area: `bottom` and `right` are the
/// folds, `top` and `left` the scroll origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Edges {
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}
