//! Geometric visibility test.
//!
//! [`VisibilityEvaluator`] decides where an element sits relative to the
//! visible area of a container: above it, below the fold, left of it, right
//! of the fold, or inside. The visible area can be grown outward by a
//! threshold so elements are reported slightly before they scroll into view.
//!
//! Every comparison is `>=`: an element whose edge exactly touches a fold is
//! still outside. Callers depend on that tie-break, keep it.

use lazyview_geometry::{is_usable_dimension, Edges, Size};

use crate::error::HostResult;
use crate::host::{ContainerRef, GeometryHost};

/// Per-call options for the directional predicates.
#[derive(Debug)]
pub struct VisibilityOptions<'a, E> {
    pub container: ContainerRef<'a, E>,
    /// Margin added around the visible area. Non-negative.
    pub threshold: f32,
}

impl<E> Clone for VisibilityOptions<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for VisibilityOptions<'_, E> {}

impl<E> Default for VisibilityOptions<'_, E> {
    fn default() -> Self {
        Self {
            container: ContainerRef::Viewport,
            threshold: 0.0,
        }
    }
}

impl<'a, E> VisibilityOptions<'a, E> {
    pub fn new(container: ContainerRef<'a, E>, threshold: f32) -> Self {
        Self {
            container,
            threshold,
        }
    }

    /// Global viewport with the given threshold.
    pub fn viewport(threshold: f32) -> Self {
        Self::new(ContainerRef::Viewport, threshold)
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn in_container(mut self, container: &'a E) -> Self {
        self.container = ContainerRef::Element(container);
        self
    }
}

/// Where an element lies relative to a container's visible area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    Above,
    LeftOf,
    Below,
    RightOf,
    Inside,
}

impl Placement {
    pub fn is_inside(self) -> bool {
        self == Placement::Inside
    }

    /// Above or left: already scrolled past, nothing to do for now.
    pub fn is_before(self) -> bool {
        matches!(self, Placement::Above | Placement::LeftOf)
    }

    /// Below or right: not reached yet.
    pub fn is_after(self) -> bool {
        matches!(self, Placement::Below | Placement::RightOf)
    }
}

/// Stateless visibility queries over a [`GeometryHost`].
///
/// Holds only a shared borrow of the host, so any number of evaluators can
/// run side by side and none of them mutates anything.
pub struct VisibilityEvaluator<'h, H: GeometryHost + ?Sized> {
    host: &'h H,
}

impl<H: GeometryHost + ?Sized> Clone for VisibilityEvaluator<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: GeometryHost + ?Sized> Copy for VisibilityEvaluator<'_, H> {}

impl<'h, H: GeometryHost + ?Sized> VisibilityEvaluator<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    // ── Element edges ───────────────────────────────────────────────────

    /// Element top offset minus `threshold`.
    pub fn element_top(&self, element: &H::Element, threshold: f32) -> HostResult<f32> {
        Ok(self.host.element_offset(element)?.y - threshold)
    }

    /// Element top offset plus its height plus `threshold`.
    pub fn element_bottom(&self, element: &H::Element, threshold: f32) -> HostResult<f32> {
        let offset = self.host.element_offset(element)?;
        let size = self.host.element_size(element)?;
        Ok(offset.y + threshold + size.height)
    }

    /// Element left offset minus `threshold`.
    pub fn element_left(&self, element: &H::Element, threshold: f32) -> HostResult<f32> {
        Ok(self.host.element_offset(element)?.x - threshold)
    }

    /// Element left offset plus its width plus `threshold`.
    pub fn element_right(&self, element: &H::Element, threshold: f32) -> HostResult<f32> {
        let offset = self.host.element_offset(element)?;
        let size = self.host.element_size(element)?;
        Ok(offset.x + threshold + size.width)
    }

    // ── Container folds ─────────────────────────────────────────────────

    /// Visible viewport dimensions, falling back per axis to
    /// [`GeometryHost::viewport_size`] when the inner size is missing.
    pub fn viewport_dimensions(&self) -> HostResult<Size> {
        let inner = self.host.viewport_inner_size().unwrap_or(Size::ZERO);
        if inner.is_usable() {
            return Ok(inner);
        }

        let fallback = self.host.viewport_size()?;
        let size = Size::new(
            if is_usable_dimension(inner.width) {
                inner.width
            } else {
                fallback.width
            },
            if is_usable_dimension(inner.height) {
                inner.height
            } else {
                fallback.height
            },
        );
        if !size.is_usable() {
            log::warn!(
                "viewport reports a degenerate size {}x{}; every element will be outside it",
                size.width,
                size.height
            );
        }
        Ok(size)
    }

    /// The bottom fold: viewport height plus vertical scroll, or container
    /// top plus container height.
    pub fn container_visible_bottom(&self, container: ContainerRef<'_, H::Element>) -> HostResult<f32> {
        match container {
            ContainerRef::Viewport => {
                Ok(self.viewport_dimensions()?.height + self.host.viewport_scroll()?.y)
            }
            ContainerRef::Element(element) => {
                let offset = self.host.element_offset(element)?;
                Ok(offset.y + self.host.element_size(element)?.height)
            }
        }
    }

    /// The right fold: viewport width plus horizontal scroll, or container
    /// left plus container width.
    pub fn container_visible_right(&self, container: ContainerRef<'_, H::Element>) -> HostResult<f32> {
        match container {
            ContainerRef::Viewport => {
                Ok(self.viewport_dimensions()?.width + self.host.viewport_scroll()?.x)
            }
            ContainerRef::Element(element) => {
                let offset = self.host.element_offset(element)?;
                Ok(offset.x + self.host.element_size(element)?.width)
            }
        }
    }

    /// Vertical scroll of the viewport, or the container's top offset.
    pub fn container_visible_top(&self, container: ContainerRef<'_, H::Element>) -> HostResult<f32> {
        match container {
            ContainerRef::Viewport => Ok(self.host.viewport_scroll()?.y),
            ContainerRef::Element(element) => Ok(self.host.element_offset(element)?.y),
        }
    }

    /// Horizontal scroll of the viewport, or the container's left offset.
    pub fn container_visible_left(&self, container: ContainerRef<'_, H::Element>) -> HostResult<f32> {
        match container {
            ContainerRef::Viewport => Ok(self.host.viewport_scroll()?.x),
            ContainerRef::Element(element) => Ok(self.host.element_offset(element)?.x),
        }
    }

    /// All four edges of the container's visible area.
    pub fn container_edges(&self, container: ContainerRef<'_, H::Element>) -> HostResult<Edges> {
        Ok(Edges::new(
            self.container_visible_top(container)?,
            self.container_visible_left(container)?,
            self.container_visible_bottom(container)?,
            self.container_visible_right(container)?,
        ))
    }

    // ── Directional predicates ──────────────────────────────────────────

    pub fn is_below_visible_area(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<bool> {
        let fold = self.container_visible_bottom(options.container)?;
        Ok(self.element_top(element, options.threshold)? >= fold)
    }

    pub fn is_above_visible_area(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<bool> {
        let fold = self.container_visible_top(options.container)?;
        Ok(fold >= self.element_bottom(element, options.threshold)?)
    }

    pub fn is_right_of_visible_area(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<bool> {
        let fold = self.container_visible_right(options.container)?;
        Ok(self.element_left(element, options.threshold)? >= fold)
    }

    pub fn is_left_of_visible_area(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<bool> {
        let fold = self.container_visible_left(options.container)?;
        Ok(fold >= self.element_right(element, options.threshold)?)
    }

    /// True iff none of the four directional predicates hold.
    pub fn is_in_visible_area(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<bool> {
        Ok(!self.is_right_of_visible_area(element, options)?
            && !self.is_left_of_visible_area(element, options)?
            && !self.is_below_visible_area(element, options)?
            && !self.is_above_visible_area(element, options)?)
    }

    /// First placement that holds, checked in the order the update pass
    /// uses: above, left, below, right.
    pub fn classify(
        &self,
        element: &H::Element,
        options: VisibilityOptions<'_, H::Element>,
    ) -> HostResult<Placement> {
        if self.is_above_visible_area(element, options)? {
            return Ok(Placement::Above);
        }
        if self.is_left_of_visible_area(element, options)? {
            return Ok(Placement::LeftOf);
        }
        if self.is_below_visible_area(element, options)? {
            return Ok(Placement::Below);
        }
        if self.is_right_of_visible_area(element, options)? {
            return Ok(Placement::RightOf);
        }
        Ok(Placement::Inside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use lazyview_geometry::{Point, Rect};

    /// Elements are their own rectangles; `None` stands for a detached handle.
    struct RectHost {
        inner: Option<Size>,
        fallback: Size,
        scroll: Point,
    }

    impl RectHost {
        fn window(width: f32, height: f32) -> Self {
            Self {
                inner: Some(Size::new(width, height)),
                fallback: Size::ZERO,
                scroll: Point::ZERO,
            }
        }
    }

    impl GeometryHost for RectHost {
        type Element = Option<Rect>;

        fn element_offset(&self, element: &Self::Element) -> HostResult<Point> {
            element
                .map(|rect| rect.origin())
                .ok_or_else(|| HostError::Detached("rect".into()))
        }

        fn element_size(&self, element: &Self::Element) -> HostResult<Size> {
            element
                .map(|rect| rect.size())
                .ok_or_else(|| HostError::Detached("rect".into()))
        }

        fn viewport_inner_size(&self) -> Option<Size> {
            self.inner
        }

        fn viewport_size(&self) -> HostResult<Size> {
            Ok(self.fallback)
        }

        fn viewport_scroll(&self) -> HostResult<Point> {
            Ok(self.scroll)
        }
    }

    fn at(x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
        Some(Rect::new(x, y, width, height))
    }

    #[test]
    fn element_edges_apply_threshold_outward() {
        let host = RectHost::window(1024.0, 768.0);
        let eval = VisibilityEvaluator::new(&host);
        let el = at(40.0, 780.0, 30.0, 20.0);

        assert_eq!(eval.element_top(&el, 5.0).unwrap(), 775.0);
        assert_eq!(eval.element_bottom(&el, 5.0).unwrap(), 805.0);
        assert_eq!(eval.element_left(&el, 5.0).unwrap(), 35.0);
        assert_eq!(eval.element_right(&el, 5.0).unwrap(), 75.0);
    }

    #[test]
    fn below_fold_respects_threshold() {
        let host = RectHost::window(1024.0, 768.0);
        let eval = VisibilityEvaluator::new(&host);
        let el = at(0.0, 780.0, 10.0, 20.0);

        assert!(eval.is_below_visible_area(&el, VisibilityOptions::viewport(0.0)).unwrap());
        assert!(eval.is_below_visible_area(&el, VisibilityOptions::viewport(5.0)).unwrap());
        assert!(!eval.is_below_visible_area(&el, VisibilityOptions::viewport(20.0)).unwrap());
    }

    #[test]
    fn touching_the_fold_is_outside() {
        let host = RectHost::window(1024.0, 768.0);
        let eval = VisibilityEvaluator::new(&host);
        let el = at(0.0, 768.0, 10.0, 20.0);

        assert!(eval.is_below_visible_area(&el, VisibilityOptions::default()).unwrap());
        assert_eq!(
            eval.classify(&el, VisibilityOptions::default()).unwrap(),
            Placement::Below
        );
    }

    #[test]
    fn right_fold_of_container_uses_width() {
        let host = RectHost::window(1920.0, 1080.0);
        let eval = VisibilityEvaluator::new(&host);
        let container = at(0.0, 0.0, 1024.0, 768.0);
        let el = at(1040.0, 10.0, 10.0, 10.0);
        let opts = VisibilityOptions::default().in_container(&container);

        assert_eq!(eval.container_visible_right(opts.container).unwrap(), 1024.0);
        assert!(eval.is_right_of_visible_area(&el, opts).unwrap());
        assert!(!eval.is_right_of_visible_area(&el, opts.with_threshold(20.0)).unwrap());
    }

    #[test]
    fn missing_inner_height_falls_back_per_axis() {
        let host = RectHost {
            inner: Some(Size::new(1024.0, 0.0)),
            fallback: Size::new(800.0, 600.0),
            scroll: Point::new(0.0, 100.0),
        };
        let eval = VisibilityEvaluator::new(&host);

        assert_eq!(eval.viewport_dimensions().unwrap(), Size::new(1024.0, 600.0));
        assert_eq!(eval.container_visible_bottom(ContainerRef::Viewport).unwrap(), 700.0);
    }

    #[test]
    fn absent_inner_size_uses_fallback() {
        let host = RectHost {
            inner: None,
            fallback: Size::new(800.0, 600.0),
            scroll: Point::new(50.0, 0.0),
        };
        let eval = VisibilityEvaluator::new(&host);

        assert_eq!(
            eval.container_edges(ContainerRef::Viewport).unwrap(),
            Edges::new(0.0, 50.0, 600.0, 850.0)
        );
    }

    #[test]
    fn detached_element_propagates_host_error() {
        let host = RectHost::window(1024.0, 768.0);
        let eval = VisibilityEvaluator::new(&host);

        let err = eval
            .is_in_visible_area(&None, VisibilityOptions::default())
            .unwrap_err();
        assert_eq!(err, HostError::Detached("rect".into()));
    }

    #[test]
    fn classify_reports_scrolled_past_before_after() {
        let mut host = RectHost::window(1024.0, 768.0);
        host.scroll = Point::new(0.0, 1000.0);
        let eval = VisibilityEvaluator::new(&host);
        let opts = VisibilityOptions::default();

        // Above wins even though the element is also left of the viewport.
        let el = at(-50.0, 100.0, 10.0, 10.0);
        assert_eq!(eval.classify(&el, opts).unwrap(), Placement::Above);
        assert!(Placement::Above.is_before());

        let el = at(10.0, 1200.0, 10.0, 10.0);
        assert_eq!(eval.classify(&el, opts).unwrap(), Placement::Inside);

        let el = at(2000.0, 1200.0, 10.0, 10.0);
        assert_eq!(eval.classify(&el, opts).unwrap(), Placement::RightOf);
        assert!(Placement::RightOf.is_after());
    }
}
