//! In-memory page model.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use lazyview_geometry::{Point, Rect, Size};

/// Handle to an element of a [`FakeDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

#[derive(Clone, Debug)]
pub struct FakeElement {
    pub tag: String,
    pub rect: Rect,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub rendered: bool,
    pub attached: bool,
}

#[derive(Debug)]
pub(crate) struct DocumentState {
    pub elements: Vec<FakeElement>,
    /// What `innerWidth`/`innerHeight` report; `None` means not exposed.
    pub inner_size: Option<Size>,
    /// What the fallback viewport query reports.
    pub viewport_size: Size,
    pub scroll: Point,
    pub queries: usize,
}

/// Shared, cheaply clonable page. Clones see the same state.
#[derive(Clone, Debug)]
pub struct FakeDocument {
    pub(crate) state: Rc<RefCell<DocumentState>>,
}

impl FakeDocument {
    /// A page whose window reports `viewport` both as inner size and as
    /// fallback size.
    pub fn new(viewport: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState {
                elements: Vec::new(),
                inner_size: Some(viewport),
                viewport_size: viewport,
                scroll: Point::ZERO,
                queries: 0,
            })),
        }
    }

    /// A 1024x768 desktop window.
    pub fn desktop() -> Self {
        Self::new(Size::new(1024.0, 768.0))
    }

    pub fn add(&self, tag: &str, rect: Rect) -> ElementId {
        let mut state = self.state.borrow_mut();
        state.elements.push(FakeElement {
            tag: tag.to_string(),
            rect,
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            rendered: true,
            attached: true,
        });
        ElementId(state.elements.len() - 1)
    }

    pub fn add_image(&self, rect: Rect, original: &str) -> ElementId {
        let id = self.add("img", rect);
        self.set_attribute(id, "data-original", original);
        id
    }

    /// `count` images stacked vertically at x = 0, each `height` tall,
    /// with `data-original` set to `image-<n>.jpg`.
    pub fn add_image_column(&self, count: usize, width: f32, height: f32) -> Vec<ElementId> {
        (0..count)
            .map(|i| {
                self.add_image(
                    Rect::new(0.0, i as f32 * height, width, height),
                    &format!("image-{i}.jpg"),
                )
            })
            .collect()
    }

    pub fn set_attribute(&self, id: ElementId, name: &str, value: &str) {
        self.with_element_mut(id, |element| {
            element.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.state
            .borrow()
            .elements
            .get(id.0)
            .and_then(|element| element.attributes.get(name).cloned())
    }

    pub fn set_style(&self, id: ElementId, name: &str, value: &str) {
        self.with_element_mut(id, |element| {
            element.styles.insert(name.to_string(), value.to_string());
        });
    }

    pub fn style(&self, id: ElementId, name: &str) -> Option<String> {
        self.state
            .borrow()
            .elements
            .get(id.0)
            .and_then(|element| element.styles.get(name).cloned())
    }

    pub fn tag(&self, id: ElementId) -> Option<String> {
        self.state
            .borrow()
            .elements
            .get(id.0)
            .map(|element| element.tag.clone())
    }

    pub fn set_rendered(&self, id: ElementId, rendered: bool) {
        self.with_element_mut(id, |element| element.rendered = rendered);
    }

    /// Detaches the element; geometry queries on it fail afterwards.
    pub fn detach(&self, id: ElementId) {
        self.with_element_mut(id, |element| element.attached = false);
    }

    pub fn scroll_to(&self, x: f32, y: f32) {
        self.state.borrow_mut().scroll = Point::new(x, y);
    }

    /// Resizes the window; both inner and fallback sizes follow.
    pub fn resize_viewport(&self, size: Size) {
        let mut state = self.state.borrow_mut();
        state.inner_size = Some(size);
        state.viewport_size = size;
    }

    /// Overrides only what the inner-size query reports.
    pub fn set_inner_size(&self, inner: Option<Size>) {
        self.state.borrow_mut().inner_size = inner;
    }

    /// Number of geometry queries answered so far.
    pub fn query_count(&self) -> usize {
        self.state.borrow().queries
    }

    pub fn len(&self) -> usize {
        self.state.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_element_mut(&self, id: ElementId, f: impl FnOnce(&mut FakeElement)) {
        let mut state = self.state.borrow_mut();
        match state.elements.get_mut(id.0) {
            Some(element) => f(element),
            None => panic!("no element {id:?} in fake document"),
        }
    }
}
