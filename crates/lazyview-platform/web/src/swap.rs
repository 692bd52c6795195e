use lazyview_core::{css_url, ContentSwap, HostError, HostResult, MediaKind, SwapAction, EFFECT_KEYFRAMES};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement};

const KEYFRAMES_STYLE_ID: &str = "lazyview-keyframes";

/// Writes swap actions into DOM attributes and inline styles.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSwap;

fn mutation_error(what: &str, err: JsValue) -> HostError {
    HostError::Mutation(format!("{what}: {err:?}"))
}

fn style_of(element: &Element) -> HostResult<CssStyleDeclaration> {
    element
        .dyn_ref::<HtmlElement>()
        .map(HtmlElement::style)
        .ok_or_else(|| {
            HostError::Mutation(format!(
                "<{}> has no inline style",
                element.tag_name().to_lowercase()
            ))
        })
}

impl ContentSwap<Element> for DomSwap {
    fn media_kind(&self, element: &Element) -> MediaKind {
        MediaKind::from_tag(&element.tag_name())
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn apply(&mut self, element: &Element, action: &SwapAction) -> HostResult<()> {
        match action {
            SwapAction::Hide => style_of(element)?
                .set_property("display", "none")
                .map_err(|err| mutation_error("display", err)),
            SwapAction::SetSrc(url) => element
                .set_attribute("src", url)
                .map_err(|err| mutation_error("src", err)),
            SwapAction::SetSrcset(srcset) => element
                .set_attribute("srcset", srcset)
                .map_err(|err| mutation_error("srcset", err)),
            SwapAction::SetPoster(url) => element
                .set_attribute("poster", url)
                .map_err(|err| mutation_error("poster", err)),
            SwapAction::SetBackgroundImage(url) => style_of(element)?
                .set_property("background-image", &css_url(url))
                .map_err(|err| mutation_error("background-image", err)),
            SwapAction::Reveal { effect, speed } => {
                let style = style_of(element)?;
                for (property, value) in effect.reveal_styles(*speed) {
                    if value.is_empty() {
                        style
                            .remove_property(property)
                            .map_err(|err| mutation_error(property, err))?;
                    } else {
                        style
                            .set_property(property, &value)
                            .map_err(|err| mutation_error(property, err))?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Adds the reveal keyframes to `<head>` unless a previous call already did.
pub fn install_effect_keyframes(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(KEYFRAMES_STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        log::warn!("document has no <head>; reveal effects will not animate");
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_id(KEYFRAMES_STYLE_ID);
    style.set_text_content(Some(EFFECT_KEYFRAMES));
    head.append_child(&style)?;
    Ok(())
}
