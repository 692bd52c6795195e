//! Testing utilities for lazyview
//!
//! [`FakeDocument`] is a tiny in-memory page: positioned elements with tags,
//! attributes and inline styles, plus a scrollable viewport. [`FakeHost`]
//! and [`FakeSwap`] expose it to the loader as geometry host and content-swap
//! actuator, sharing the same document so swaps are observable in tests.

pub mod assertions;
pub mod document;
pub mod host;

pub use assertions::*;
pub use document::*;
pub use host::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::document::{ElementId, FakeDocument};
    pub use crate::host::{FakeHost, FakeSwap};
}
