//! Host abstraction for geometry queries.
//!
//! The evaluator never measures anything itself. Everything it knows about
//! elements and the viewport comes through [`GeometryHost`], which lets the
//! same logic run against the DOM, a test double, or any other environment
//! that can report positions and sizes.

use lazyview_geometry::{Point, Size};

use crate::error::HostResult;

/// Answers position and size queries on behalf of the evaluator.
///
/// All values are in the same units (CSS pixels for the web host) and in page
/// coordinates, i.e. element offsets already include the document scroll.
/// Results are read fresh on every call and must not be cached by the
/// implementation, because layout may change between passes.
pub trait GeometryHost {
    /// Handle to an element. Containers are elements too.
    type Element;

    /// Top-left corner of `element` in page coordinates.
    fn element_offset(&self, element: &Self::Element) -> HostResult<Point>;

    /// Width and height of `element`.
    fn element_size(&self, element: &Self::Element) -> HostResult<Size>;

    /// The viewport's inner dimensions, if the host exposes them directly.
    ///
    /// Either component may be absent, zero or non-finite; the evaluator then
    /// asks [`viewport_size`](Self::viewport_size) for that axis instead.
    fn viewport_inner_size(&self) -> Option<Size>;

    /// Secondary viewport size query, used when the inner size is missing.
    fn viewport_size(&self) -> HostResult<Size>;

    /// Current horizontal (`x`) and vertical (`y`) scroll offsets of the
    /// global viewport.
    fn viewport_scroll(&self) -> HostResult<Point>;

    /// Whether `element` is currently rendered (not `display: none` and the
    /// like). Only consulted when `skip_invisible` is enabled.
    fn is_rendered(&self, element: &Self::Element) -> bool {
        let _ = element;
        true
    }
}

/// The scrollable region visibility is measured against.
#[derive(Clone, Debug, PartialEq)]
pub enum Container<E> {
    /// The global viewport (the browser window).
    Viewport,
    /// An arbitrary scrollable element.
    Element(E),
}

impl<E> Default for Container<E> {
    fn default() -> Self {
        Container::Viewport
    }
}

impl<E> Container<E> {
    pub fn as_ref(&self) -> ContainerRef<'_, E> {
        match self {
            Container::Viewport => ContainerRef::Viewport,
            Container::Element(element) => ContainerRef::Element(element),
        }
    }

    pub fn is_viewport(&self) -> bool {
        matches!(self, Container::Viewport)
    }
}

/// Borrowed form of [`Container`], cheap to copy into per-call options.
#[derive(Debug, PartialEq)]
pub enum ContainerRef<'a, E> {
    Viewport,
    Element(&'a E),
}

// Manual impls: a derive would require `E: Clone`.
impl<E> Clone for ContainerRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ContainerRef<'_, E> {}

impl<E> Default for ContainerRef<'_, E> {
    fn default() -> Self {
        ContainerRef::Viewport
    }
}

impl<'a, E> From<&'a E> for ContainerRef<'a, E> {
    fn from(element: &'a E) -> Self {
        ContainerRef::Element(element)
    }
}
