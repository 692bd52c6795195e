//! Assertion helpers for lazy-loading tests.
//!
//! Each helper takes a trailing `msg` that prefixes the panic message, so a
//! failing scenario says which step went wrong.

use crate::document::{ElementId, FakeDocument};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the element's `src` is `expected`.
pub fn assert_src(doc: &FakeDocument, id: ElementId, expected: &str, msg: &str) {
    let actual = doc.attribute(id, "src");
    assert_eq!(
        actual.as_deref(),
        Some(expected),
        "{}: src of {:?}",
        msg,
        id
    );
}

/// Assert that the element shows its `data-original` URL.
pub fn assert_loaded(doc: &FakeDocument, id: ElementId, msg: &str) {
    let original = doc.attribute(id, "data-original");
    assert!(
        original.is_some(),
        "{}: {:?} has no data-original attribute",
        msg,
        id
    );
    let shown = match doc.tag(id).as_deref() {
        Some(tag) if tag.eq_ignore_ascii_case("img") => doc.attribute(id, "src"),
        Some(tag) if tag.eq_ignore_ascii_case("video") => doc.attribute(id, "poster"),
        _ => doc
            .style(id, "background-image")
            .map(|style| style.trim_start_matches("url('").trim_end_matches("')").to_string()),
    };
    assert_eq!(shown, original, "{}: {:?} not loaded", msg, id);
}

/// Assert that the element does not show its `data-original` URL yet.
pub fn assert_pending(doc: &FakeDocument, id: ElementId, msg: &str) {
    let original = doc.attribute(id, "data-original");
    let src = doc.attribute(id, "src");
    let poster = doc.attribute(id, "poster");
    assert!(
        original.is_none() || (src != original && poster != original),
        "{}: {:?} already loaded {:?}",
        msg,
        id,
        original
    );
    assert_eq!(
        doc.style(id, "background-image"),
        None,
        "{}: {:?} already has a background",
        msg,
        id
    );
}

/// Assert that exactly the first `count` of `ids` are loaded and the rest
/// are pending.
pub fn assert_loaded_prefix(doc: &FakeDocument, ids: &[ElementId], count: usize, msg: &str) {
    for (index, id) in ids.iter().enumerate() {
        if index < count {
            assert_loaded(doc, *id, &format!("{} - #{}", msg, index));
        } else {
            assert_pending(doc, *id, &format!("{} - #{}", msg, index));
        }
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T: std::fmt::Debug>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {:?}",
        msg,
        expected,
        items
    );
}
