//! Deferred loading of off-screen media.
//!
//! The crate decides which registered elements are inside (or within a
//! threshold of) the visible area of a scrollable container, and hands those
//! to a content-swap actuator exactly once. All geometry comes from a
//! [`GeometryHost`]; nothing here touches a real DOM.
//!
//! # Architecture
//!
//! - [`VisibilityEvaluator`] - pure directional predicates (`is_below_visible_area`, ...)
//! - [`LazyLoader`] - candidate list, update pass, appear/load observers
//! - [`LazyLoadSettings`] - threshold, failure limit, container, trigger, swap options
//! - [`ContentSwap`] / [`plan_swap`] - capability-based content substitution
//! - [`ViewportFilter`] - named "below the fold" style filters
//!
//! # Example
//!
//! ```rust,ignore
//! use lazyview_core::{LazyLoader, LazyLoadSettings, Notification};
//!
//! let mut loader = LazyLoader::new(host, LazyLoadSettings::new().with_threshold(200.0));
//! loader.register_all(images)?;
//! loader.on_appear(|event| log::info!("{:?} appeared", event.id));
//! loader.notify(Notification::Startup)?;
//! ```

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod host;
pub mod loader;
pub mod observer;
pub mod settings;
pub mod swap;

#[cfg(test)]
mod tests;

pub use error::{HostError, HostResult, SettingsError};
pub use evaluator::{Placement, VisibilityEvaluator, VisibilityOptions};
pub use filter::{filter_elements, ViewportFilter};
pub use host::{Container, ContainerRef, GeometryHost};
pub use loader::{CandidateId, LazyLoader, Notification, PassReport};
pub use observer::{AppearEvent, LoadEvent, ObserverId};
pub use settings::{
    Effect, LazyLoadSettings, Trigger, DEFAULT_EFFECT_SPEED_MS, DEFAULT_PLACEHOLDER,
    EFFECT_KEYFRAMES,
};
pub use swap::{
    css_url, placeholder_action, plan_swap, ContentSwap, MediaKind, SwapAction, SwapCapabilities,
    SwapPlan, SwapSource,
};

pub use lazyview_geometry as geometry;

pub mod prelude {
    pub use crate::error::{HostError, HostResult};
    pub use crate::evaluator::{Placement, VisibilityEvaluator, VisibilityOptions};
    pub use crate::host::{Container, ContainerRef, GeometryHost};
    pub use crate::loader::{CandidateId, LazyLoader, Notification};
    pub use crate::settings::{Effect, LazyLoadSettings, Trigger};
    pub use crate::swap::{ContentSwap, MediaKind, SwapAction};
    pub use lazyview_geometry::prelude::*;
}
