//! Content swap planning.
//!
//! When a candidate appears, the real resource URL replaces whatever the
//! element currently shows. Which attribute receives it depends on what the
//! element can display, expressed as [`SwapCapabilities`] per [`MediaKind`]
//! rather than by sniffing tag names at each step. The loader builds a
//! [`SwapPlan`]; a [`ContentSwap`] actuator owned by the host carries it out.

use smallvec::SmallVec;

use crate::error::HostResult;
use crate::settings::Effect;

/// Broad element category, as far as swapping content is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `<img>`: takes `src` and `srcset`.
    Image,
    /// `<video>`: takes a `poster`.
    Video,
    /// Anything else: gets a CSS background image.
    Generic,
}

impl MediaKind {
    /// Maps a tag name (any case) to a kind.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("img") {
            MediaKind::Image
        } else if tag.eq_ignore_ascii_case("video") {
            MediaKind::Video
        } else {
            MediaKind::Generic
        }
    }

    pub fn capabilities(self) -> SwapCapabilities {
        match self {
            MediaKind::Image => SwapCapabilities {
                src: true,
                poster: false,
                background: false,
            },
            MediaKind::Video => SwapCapabilities {
                src: false,
                poster: true,
                background: false,
            },
            MediaKind::Generic => SwapCapabilities {
                src: false,
                poster: false,
                background: true,
            },
        }
    }
}

/// Which targets an element accepts for the swapped URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SwapCapabilities {
    pub src: bool,
    pub poster: bool,
    pub background: bool,
}

/// One mutation applied to an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapAction {
    /// Hide the element before its content changes.
    Hide,
    SetSrc(String),
    SetSrcset(String),
    SetPoster(String),
    /// Set `background-image: url('<url>')`.
    SetBackgroundImage(String),
    /// Reveal the element again with the configured effect.
    Reveal { effect: Effect, speed: Option<u32> },
}

/// Ordered list of actions for one element. Empty means "leave it alone".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapPlan {
    pub actions: SmallVec<[SwapAction; 4]>,
}

impl SwapPlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwapAction> {
        self.actions.iter()
    }
}

/// What the actuator found on the element at swap time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwapSource<'a> {
    pub current_src: Option<&'a str>,
    pub original: Option<&'a str>,
    pub srcset: Option<&'a str>,
}

/// Builds the swap for an element of `kind`.
///
/// Nothing happens when the element has no original URL or already shows
/// it. Otherwise the element is hidden, the URL goes to every target the kind
/// supports, and the element is revealed with `effect`.
pub fn plan_swap(
    kind: MediaKind,
    source: SwapSource<'_>,
    effect: Effect,
    speed: Option<u32>,
) -> SwapPlan {
    let mut plan = SwapPlan::default();
    let Some(original) = source.original.filter(|url| !url.is_empty()) else {
        log::debug!("{kind:?} element has no original URL, nothing to swap");
        return plan;
    };
    if source.current_src == Some(original) {
        return plan;
    }

    let capabilities = kind.capabilities();
    plan.actions.push(SwapAction::Hide);
    if capabilities.src {
        plan.actions.push(SwapAction::SetSrc(original.to_string()));
        if let Some(srcset) = source.srcset.filter(|srcset| !srcset.is_empty()) {
            plan.actions.push(SwapAction::SetSrcset(srcset.to_string()));
        }
    }
    if capabilities.poster {
        plan.actions.push(SwapAction::SetPoster(original.to_string()));
    }
    if capabilities.background {
        plan.actions
            .push(SwapAction::SetBackgroundImage(original.to_string()));
    }
    plan.actions.push(SwapAction::Reveal { effect, speed });
    plan
}

/// The placeholder `src` for a freshly registered element, if it needs one.
///
/// Only elements that take a `src` and do not have one yet get it.
pub fn placeholder_action(
    kind: MediaKind,
    current_src: Option<&str>,
    placeholder: &str,
) -> Option<SwapAction> {
    let has_src = current_src.is_some_and(|src| !src.is_empty());
    (kind.capabilities().src && !has_src).then(|| SwapAction::SetSrc(placeholder.to_string()))
}

/// CSS `url(...)` value for a background image.
pub fn css_url(url: &str) -> String {
    format!("url('{}')", url.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Performs content swaps on behalf of the loader.
///
/// The host decides how each [`SwapAction`] maps onto its element model;
/// the web adapter writes DOM attributes and inline styles.
pub trait ContentSwap<E> {
    fn media_kind(&self, element: &E) -> MediaKind;

    /// Reads an attribute; `None` when it is absent.
    fn attribute(&self, element: &E, name: &str) -> Option<String>;

    fn apply(&mut self, element: &E, action: &SwapAction) -> HostResult<()>;

    /// Applies a whole plan in order.
    fn apply_plan(&mut self, element: &E, plan: &SwapPlan) -> HostResult<()> {
        for action in plan.iter() {
            self.apply(element, action)?;
        }
        Ok(())
    }
}
