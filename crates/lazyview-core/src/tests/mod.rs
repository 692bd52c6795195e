
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lazyview_geometry::{Point, Rect, Size};

use crate::error::{HostError, HostResult};
use crate::host::GeometryHost;
use crate::swap::{ContentSwap, MediaKind, SwapAction};

/// Elements are indices into `rects`; an index past the end is detached.
pub(crate) struct StubHost {
    pub rects: Vec<Rect>,
    pub hidden: Vec<usize>,
    pub viewport: Size,
    pub scroll: Point,
}

impl StubHost {
    pub fn new(viewport: Size, rects: Vec<Rect>) -> Self {
        Self {
            rects,
            hidden: Vec::new(),
            viewport,
            scroll: Point::ZERO,
        }
    }

    /// A single column of `count` images, `height` tall, starting at y = 0.
    pub fn column(viewport: Size, count: usize, height: f32) -> Self {
        let rects = (0..count)
            .map(|i| Rect::new(0.0, i as f32 * height, 100.0, height))
            .collect();
        Self::new(viewport, rects)
    }

    fn rect(&self, element: &usize) -> HostResult<Rect> {
        self.rects
            .get(*element)
            .copied()
            .ok_or_else(|| HostError::Detached(format!("element {element}")))
    }
}

impl GeometryHost for StubHost {
    type Element = usize;

    fn element_offset(&self, element: &usize) -> HostResult<Point> {
        Ok(self.rect(element)?.origin())
    }

    fn element_size(&self, element: &usize) -> HostResult<Size> {
        Ok(self.rect(element)?.size())
    }

    fn viewport_inner_size(&self) -> Option<Size> {
        Some(self.viewport)
    }

    fn viewport_size(&self) -> HostResult<Size> {
        Ok(self.viewport)
    }

    fn viewport_scroll(&self) -> HostResult<Point> {
        Ok(self.scroll)
    }

    fn is_rendered(&self, element: &usize) -> bool {
        !self.hidden.contains(element)
    }
}

/// Shared record of what the actuator saw and did.
#[derive(Default)]
pub(crate) struct SwapLog {
    pub attributes: HashMap<(usize, String), String>,
    pub kinds: HashMap<usize, MediaKind>,
    pub applied: Vec<(usize, SwapAction)>,
}

#[derive(Clone, Default)]
pub(crate) struct StubSwap {
    pub log: Rc<RefCell<SwapLog>>,
}

impl StubSwap {
    pub fn set_attribute(&self, element: usize, name: &str, value: &str) {
        self.log
            .borrow_mut()
            .attributes
            .insert((element, name.to_string()), value.to_string());
    }

    pub fn applied_to(&self, element: usize) -> Vec<SwapAction> {
        self.log
            .borrow()
            .applied
            .iter()
            .filter(|(target, _)| *target == element)
            .map(|(_, action)| action.clone())
            .collect()
    }
}

impl ContentSwap<usize> for StubSwap {
    fn media_kind(&self, element: &usize) -> MediaKind {
        self.log
            .borrow()
            .kinds
            .get(element)
            .copied()
            .unwrap_or(MediaKind::Image)
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.log
            .borrow()
            .attributes
            .get(&(*element, name.to_string()))
            .cloned()
    }

    fn apply(&mut self, element: &usize, action: &SwapAction) -> HostResult<()> {
        let mut log = self.log.borrow_mut();
        if let SwapAction::SetSrc(src) = action {
            log.attributes.insert((*element, "src".to_string()), src.clone());
        }
        log.applied.push((*element, action.clone()));
        Ok(())
    }
}
