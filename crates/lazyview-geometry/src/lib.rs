//! Pure geometry for lazyview
//!
//! Points, sizes, rectangles and the four-edge [`Edges`] value used to
//! describe the visible area of a container. Nothing in here talks to a host.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Edges, Point, Rect, Size};
}
