//! Named viewport filters.
//!
//! Convenience predicates evaluated against the global viewport with no
//! threshold, for selecting elements by where they sit right now. The
//! "above" and "left" variants are the complements of "below" and "right"
//! (anything not past the fold), not the strict above/left tests.

use crate::error::HostResult;
use crate::evaluator::{VisibilityEvaluator, VisibilityOptions};
use crate::host::GeometryHost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportFilter {
    BelowTheFold,
    /// Not below the fold.
    AboveTheFold,
    RightOfFold,
    /// Not right of the fold.
    LeftOfFold,
    InViewport,
}

impl ViewportFilter {
    /// Parses a selector name, including the older aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(':').unwrap_or(name);
        match name {
            "below-the-fold" => Some(ViewportFilter::BelowTheFold),
            "above-the-top" | "above-the-fold" => Some(ViewportFilter::AboveTheFold),
            "right-of-screen" | "right-of-fold" => Some(ViewportFilter::RightOfFold),
            "left-of-screen" | "left-of-fold" => Some(ViewportFilter::LeftOfFold),
            "in-viewport" => Some(ViewportFilter::InViewport),
            _ => None,
        }
    }

    pub fn matches<H: GeometryHost + ?Sized>(
        self,
        evaluator: &VisibilityEvaluator<'_, H>,
        element: &H::Element,
    ) -> HostResult<bool> {
        let options = VisibilityOptions::viewport(0.0);
        match self {
            ViewportFilter::BelowTheFold => evaluator.is_below_visible_area(element, options),
            ViewportFilter::AboveTheFold => {
                Ok(!evaluator.is_below_visible_area(element, options)?)
            }
            ViewportFilter::RightOfFold => evaluator.is_right_of_visible_area(element, options),
            ViewportFilter::LeftOfFold => {
                Ok(!evaluator.is_right_of_visible_area(element, options)?)
            }
            ViewportFilter::InViewport => evaluator.is_in_visible_area(element, options),
        }
    }
}

/// Keeps the elements matching `filter`, preserving order.
pub fn filter_elements<'e, H, I>(
    host: &H,
    elements: I,
    filter: ViewportFilter,
) -> HostResult<Vec<&'e H::Element>>
where
    H: GeometryHost + ?Sized,
    H::Element: 'e,
    I: IntoIterator<Item = &'e H::Element>,
{
    let evaluator = VisibilityEvaluator::new(host);
    let mut matched = Vec::new();
    for element in elements {
        if filter.matches(&evaluator, element)? {
            matched.push(element);
        }
    }
    Ok(matched)
}
