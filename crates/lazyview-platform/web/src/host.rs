use lazyview_core::{GeometryHost, HostError, HostResult};
use lazyview_geometry::{Point, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, Window};

/// Geometry straight from the live DOM.
///
/// Offsets are page coordinates: the bounding client rect shifted by the
/// window scroll.
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Window,
}

impl DomHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Host for the global `window`, if there is one.
    pub fn from_global() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn connected<'e>(&self, element: &'e Element) -> HostResult<&'e Element> {
        if element.is_connected() {
            Ok(element)
        } else {
            Err(HostError::Detached(format!("<{}>", element.tag_name().to_lowercase())))
        }
    }
}

pub(crate) fn query_error(what: &str, err: JsValue) -> HostError {
    HostError::Query(format!("{what}: {err:?}"))
}

impl GeometryHost for DomHost {
    type Element = Element;

    fn element_offset(&self, element: &Element) -> HostResult<Point> {
        let rect = self.connected(element)?.get_bounding_client_rect();
        let scroll = self.viewport_scroll()?;
        Ok(Point::new(
            rect.left() as f32 + scroll.x,
            rect.top() as f32 + scroll.y,
        ))
    }

    fn element_size(&self, element: &Element) -> HostResult<Size> {
        let rect = self.connected(element)?.get_bounding_client_rect();
        Ok(Size::new(rect.width() as f32, rect.height() as f32))
    }

    fn viewport_inner_size(&self) -> Option<Size> {
        // A missing axis reads as 0, which the evaluator replaces per axis.
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        if width.is_none() && height.is_none() {
            return None;
        }
        Some(Size::new(
            width.unwrap_or(0.0) as f32,
            height.unwrap_or(0.0) as f32,
        ))
    }

    fn viewport_size(&self) -> HostResult<Size> {
        let root = self
            .window
            .document()
            .and_then(|document| document.document_element())
            .ok_or_else(|| HostError::Query("no document element".into()))?;
        Ok(Size::new(root.client_width() as f32, root.client_height() as f32))
    }

    fn viewport_scroll(&self) -> HostResult<Point> {
        let x = self
            .window
            .scroll_x()
            .map_err(|err| query_error("scrollX", err))?;
        let y = self
            .window
            .scroll_y()
            .map_err(|err| query_error("scrollY", err))?;
        Ok(Point::new(x as f32, y as f32))
    }

    fn is_rendered(&self, element: &Element) -> bool {
        if !element.is_connected() {
            return false;
        }
        let has_box = element
            .dyn_ref::<HtmlElement>()
            .is_some_and(|html| html.offset_width() > 0 || html.offset_height() > 0);
        has_box || element.get_client_rects().length() > 0
    }
}
