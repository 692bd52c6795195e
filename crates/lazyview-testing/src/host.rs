//! Host and actuator implementations backed by a [`FakeDocument`].

use lazyview_core::{
    css_url, ContentSwap, GeometryHost, HostError, HostResult, MediaKind, SwapAction,
};
use lazyview_geometry::{Point, Rect, Size};

use crate::document::{ElementId, FakeDocument};

/// [`GeometryHost`] answering from a [`FakeDocument`].
///
/// Every answered query bumps the document's query counter so tests can
/// check how much work a pass did.
#[derive(Clone, Debug)]
pub struct FakeHost {
    doc: FakeDocument,
}

impl FakeHost {
    pub fn new(doc: &FakeDocument) -> Self {
        Self { doc: doc.clone() }
    }

    pub fn document(&self) -> &FakeDocument {
        &self.doc
    }

    fn rect(&self, element: &ElementId) -> HostResult<Rect> {
        let mut state = self.doc.state.borrow_mut();
        state.queries += 1;
        match state.elements.get(element.0) {
            Some(found) if found.attached => Ok(found.rect),
            Some(_) => Err(HostError::Detached(format!("{element:?} was detached"))),
            None => Err(HostError::Detached(format!("{element:?} does not exist"))),
        }
    }
}

impl GeometryHost for FakeHost {
    type Element = ElementId;

    fn element_offset(&self, element: &ElementId) -> HostResult<Point> {
        Ok(self.rect(element)?.origin())
    }

    fn element_size(&self, element: &ElementId) -> HostResult<Size> {
        Ok(self.rect(element)?.size())
    }

    fn viewport_inner_size(&self) -> Option<Size> {
        let mut state = self.doc.state.borrow_mut();
        state.queries += 1;
        state.inner_size
    }

    fn viewport_size(&self) -> HostResult<Size> {
        let mut state = self.doc.state.borrow_mut();
        state.queries += 1;
        Ok(state.viewport_size)
    }

    fn viewport_scroll(&self) -> HostResult<Point> {
        let mut state = self.doc.state.borrow_mut();
        state.queries += 1;
        Ok(state.scroll)
    }

    fn is_rendered(&self, element: &ElementId) -> bool {
        self.doc
            .state
            .borrow()
            .elements
            .get(element.0)
            .is_some_and(|found| found.rendered && found.attached)
    }
}

/// [`ContentSwap`] writing attributes and inline styles into a
/// [`FakeDocument`], the way the DOM actuator does on a real page.
#[derive(Clone, Debug)]
pub struct FakeSwap {
    doc: FakeDocument,
    fail_on: Option<ElementId>,
}

impl FakeSwap {
    pub fn new(doc: &FakeDocument) -> Self {
        Self {
            doc: doc.clone(),
            fail_on: None,
        }
    }

    /// Makes every mutation of `element` fail.
    pub fn failing_on(mut self, element: ElementId) -> Self {
        self.fail_on = Some(element);
        self
    }
}

impl ContentSwap<ElementId> for FakeSwap {
    fn media_kind(&self, element: &ElementId) -> MediaKind {
        self.doc
            .tag(*element)
            .map(|tag| MediaKind::from_tag(&tag))
            .unwrap_or(MediaKind::Generic)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.doc.attribute(*element, name)
    }

    fn apply(&mut self, element: &ElementId, action: &SwapAction) -> HostResult<()> {
        if self.fail_on == Some(*element) {
            return Err(HostError::Mutation(format!("{element:?} rejected {action:?}")));
        }
        if element.0 >= self.doc.len() {
            return Err(HostError::Detached(format!("{element:?} does not exist")));
        }
        match action {
            SwapAction::Hide => self.doc.set_style(*element, "display", "none"),
            SwapAction::SetSrc(url) => self.doc.set_attribute(*element, "src", url),
            SwapAction::SetSrcset(srcset) => self.doc.set_attribute(*element, "srcset", srcset),
            SwapAction::SetPoster(url) => self.doc.set_attribute(*element, "poster", url),
            SwapAction::SetBackgroundImage(url) => {
                self.doc.set_style(*element, "background-image", &css_url(url))
            }
            SwapAction::Reveal { effect, speed } => {
                for (property, value) in effect.reveal_styles(*speed) {
                    self.doc.set_style(*element, property, &value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyview_core::Effect;

    #[test]
    fn detached_elements_fail_geometry_queries() {
        let doc = FakeDocument::desktop();
        let id = doc.add_image(Rect::new(0.0, 0.0, 10.0, 10.0), "a.jpg");
        let host = FakeHost::new(&doc);
        assert!(host.element_offset(&id).is_ok());

        doc.detach(id);
        assert!(matches!(
            host.element_offset(&id),
            Err(HostError::Detached(_))
        ));
        assert!(!host.is_rendered(&id));
        assert!(matches!(
            host.element_size(&ElementId(42)),
            Err(HostError::Detached(_))
        ));
    }

    #[test]
    fn queries_are_counted() {
        let doc = FakeDocument::desktop();
        let id = doc.add("div", Rect::new(0.0, 0.0, 10.0, 10.0));
        let host = FakeHost::new(&doc);
        let _ = host.element_offset(&id);
        let _ = host.viewport_scroll();
        let _ = host.viewport_inner_size();
        assert_eq!(doc.query_count(), 3);
    }

    #[test]
    fn swap_writes_attributes_and_styles() {
        let doc = FakeDocument::desktop();
        let div = doc.add("div", Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut swap = FakeSwap::new(&doc);

        swap.apply(&div, &SwapAction::Hide).unwrap();
        assert_eq!(doc.style(div, "display").as_deref(), Some("none"));
        swap.apply(&div, &SwapAction::SetBackgroundImage("bg.png".into()))
            .unwrap();
        assert_eq!(
            doc.style(div, "background-image").as_deref(),
            Some("url('bg.png')")
        );
        swap.apply(
            &div,
            &SwapAction::Reveal {
                effect: Effect::FadeIn,
                speed: Some(250),
            },
        )
        .unwrap();
        assert_eq!(doc.style(div, "display").as_deref(), Some(""));
        assert_eq!(
            doc.style(div, "animation").as_deref(),
            Some("lazyview-fade-in 250ms ease-out")
        );
        assert_eq!(swap.media_kind(&div), MediaKind::Generic);
    }

    #[test]
    fn failing_swap_reports_mutation_error() {
        let doc = FakeDocument::desktop();
        let img = doc.add("img", Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut swap = FakeSwap::new(&doc).failing_on(img);
        assert!(matches!(
            swap.apply(&img, &SwapAction::SetSrc("x.jpg".into())),
            Err(HostError::Mutation(_))
        ));
        assert_eq!(doc.attribute(img, "src"), None);
    }
}
