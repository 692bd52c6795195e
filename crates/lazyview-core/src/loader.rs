//! The lazy loader: candidate bookkeeping and the update pass.
//!
//! A [`LazyLoader`] owns its host, its settings and the list of candidates
//! that have not appeared yet. Each notification (scroll, resize, startup)
//! runs one synchronous pass over the candidates in registration order:
//!
//! 1. above or left of the visible area: skipped, nothing to do yet
//! 2. inside (not below, not right): appears, miss counter resets
//! 3. below or right: counts as a miss; once misses exceed
//!    `failure_limit` the pass stops
//!
//! Step 3 is a heuristic that only holds when candidates were registered in
//! document order. Once the scan is done every appeared candidate is
//! announced, then each leaves the list for good and gets its content
//! swapped. A swap that fails is logged and reported; it never holds back
//! the candidates after it.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::HostResult;
use crate::evaluator::{VisibilityEvaluator, VisibilityOptions};
use crate::filter::ViewportFilter;
use crate::host::GeometryHost;
use crate::observer::{AppearEvent, LoadEvent, ObserverId, Observers};
use crate::settings::LazyLoadSettings;
use crate::swap::{placeholder_action, plan_swap, ContentSwap, SwapPlan, SwapSource};

/// Stable identity of a registered candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(u64);

impl CandidateId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host notifications that may run an update pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The container scrolled. Ignored when the trigger is a custom event.
    Scroll,
    /// The window was resized.
    Resize,
    /// Initial check once the document is ready.
    Startup,
}

/// What a single pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Candidates whose geometry was examined.
    pub evaluated: usize,
    /// Candidates that appeared, in registration order.
    pub appeared: SmallVec<[CandidateId; 8]>,
    /// Appeared candidates whose content swap failed. They are not retried.
    pub failed: SmallVec<[CandidateId; 2]>,
    /// The failure limit cut the pass short.
    pub stopped_early: bool,
    /// The notification did not run a pass at all.
    pub skipped: bool,
}

struct Candidate<E> {
    id: CandidateId,
    element: E,
}

pub struct LazyLoader<H: GeometryHost> {
    host: H,
    settings: LazyLoadSettings<H::Element>,
    candidates: Vec<Candidate<H::Element>>,
    actuator: Option<Box<dyn ContentSwap<H::Element>>>,
    observers: Observers,
    next_candidate_id: u64,
}

impl<H: GeometryHost> LazyLoader<H> {
    pub fn new(host: H, settings: LazyLoadSettings<H::Element>) -> Self {
        Self {
            host,
            settings,
            candidates: Vec::new(),
            actuator: None,
            observers: Observers::default(),
            next_candidate_id: 1,
        }
    }

    /// Installs the actuator that performs content swaps.
    ///
    /// Without one, appearing candidates only produce [`AppearEvent`]s.
    pub fn with_actuator(mut self, actuator: impl ContentSwap<H::Element> + 'static) -> Self {
        self.actuator = Some(Box::new(actuator));
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &LazyLoadSettings<H::Element> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut LazyLoadSettings<H::Element> {
        &mut self.settings
    }

    pub fn evaluator(&self) -> VisibilityEvaluator<'_, H> {
        VisibilityEvaluator::new(&self.host)
    }

    // ── Candidates ──────────────────────────────────────────────────────

    /// Adds an element to the end of the candidate list.
    ///
    /// Images without a `src` receive the configured placeholder right away.
    pub fn register(&mut self, element: H::Element) -> HostResult<CandidateId> {
        if let Some(actuator) = self.actuator.as_mut() {
            let kind = actuator.media_kind(&element);
            let current = actuator.attribute(&element, "src");
            if let Some(action) =
                placeholder_action(kind, current.as_deref(), &self.settings.placeholder)
            {
                actuator.apply(&element, &action)?;
            }
        }

        let id = CandidateId(self.next_candidate_id);
        self.next_candidate_id += 1;
        self.candidates.push(Candidate { id, element });
        Ok(id)
    }

    pub fn register_all<I>(&mut self, elements: I) -> HostResult<Vec<CandidateId>>
    where
        I: IntoIterator<Item = H::Element>,
    {
        elements
            .into_iter()
            .map(|element| self.register(element))
            .collect()
    }

    /// Drops a candidate without loading it.
    pub fn unregister(&mut self, id: CandidateId) -> Option<H::Element> {
        let index = self.position(id)?;
        Some(self.candidates.remove(index).element)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.position(id).is_some()
    }

    pub fn element(&self, id: CandidateId) -> Option<&H::Element> {
        self.position(id).map(|index| &self.candidates[index].element)
    }

    /// Pending candidates in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = (CandidateId, &H::Element)> {
        self.candidates
            .iter()
            .map(|candidate| (candidate.id, &candidate.element))
    }

    fn position(&self, id: CandidateId) -> Option<usize> {
        self.candidates.iter().position(|candidate| candidate.id == id)
    }

    // ── Observers ───────────────────────────────────────────────────────

    pub fn on_appear(&mut self, callback: impl Fn(&AppearEvent) + 'static) -> ObserverId {
        self.observers.add_appear(Rc::new(callback))
    }

    pub fn on_load(&mut self, callback: impl Fn(&LoadEvent) + 'static) -> ObserverId {
        self.observers.add_load(Rc::new(callback))
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    // ── Passes ──────────────────────────────────────────────────────────

    /// Handles a host notification, running a pass when it should.
    pub fn notify(&mut self, notification: Notification) -> HostResult<PassReport> {
        if notification == Notification::Scroll && !self.settings.trigger.is_scroll() {
            return Ok(PassReport {
                skipped: true,
                ..PassReport::default()
            });
        }
        self.update()
    }

    /// Runs one update pass over the candidates.
    pub fn update(&mut self) -> HostResult<PassReport> {
        let mut report = PassReport::default();
        let evaluator = VisibilityEvaluator::new(&self.host);
        let options = VisibilityOptions::new(self.settings.container.as_ref(), self.settings.threshold);
        let mut misses = 0usize;

        for candidate in &self.candidates {
            let element = &candidate.element;
            if self.settings.skip_invisible && !self.host.is_rendered(element) {
                log::debug!("candidate {:?} is not rendered, skipping", candidate.id);
                continue;
            }
            report.evaluated += 1;

            if evaluator.is_above_visible_area(element, options)?
                || evaluator.is_left_of_visible_area(element, options)?
            {
                continue;
            }

            if !evaluator.is_below_visible_area(element, options)?
                && !evaluator.is_right_of_visible_area(element, options)?
            {
                report.appeared.push(candidate.id);
                misses = 0;
            } else {
                misses += 1;
                if misses > self.settings.failure_limit {
                    report.stopped_early = true;
                    break;
                }
            }
        }

        // Every appear of one pass sees the same pending count.
        let pending = self.candidates.len();
        for &id in &report.appeared {
            self.emit_appear(id, pending);
        }
        for &id in &report.appeared {
            let Some(index) = self.position(id) else {
                continue;
            };
            let candidate = self.candidates.remove(index);
            if let Err(err) = self.swap_in(candidate) {
                log::warn!("content swap of {id:?} failed: {err}");
                report.failed.push(id);
            }
        }

        log::trace!(
            "lazy load pass: {} evaluated, {} appeared, {} failed, {} pending{}",
            report.evaluated,
            report.appeared.len(),
            report.failed.len(),
            self.candidates.len(),
            if report.stopped_early {
                ", stopped at failure limit"
            } else {
                ""
            }
        );
        Ok(report)
    }

    /// Forces a candidate to appear regardless of its geometry.
    ///
    /// Hosts call this when a candidate receives the custom trigger event.
    /// Returns false if the candidate already appeared or was never
    /// registered. The candidate leaves the list even when its swap fails.
    pub fn trigger(&mut self, id: CandidateId) -> HostResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.emit_appear(id, self.candidates.len());
        let candidate = self.candidates.remove(index);
        self.swap_in(candidate)?;
        Ok(true)
    }

    /// Pending candidates matching a viewport filter, in registration order.
    pub fn filter(&self, filter: ViewportFilter) -> HostResult<Vec<CandidateId>> {
        let evaluator = self.evaluator();
        let mut matched = Vec::new();
        for candidate in &self.candidates {
            if filter.matches(&evaluator, &candidate.element)? {
                matched.push(candidate.id);
            }
        }
        Ok(matched)
    }

    fn emit_appear(&self, id: CandidateId, elements_left: usize) {
        log::debug!("candidate {id:?} appeared");
        self.observers.emit_appear(&AppearEvent { id, elements_left });
    }

    /// Swaps the content of a candidate that already left the list.
    fn swap_in(&mut self, candidate: Candidate<H::Element>) -> HostResult<()> {
        let Some(actuator) = self.actuator.as_mut() else {
            return Ok(());
        };
        let plan = build_plan(&**actuator, &candidate.element, &self.settings);
        actuator.apply_plan(&candidate.element, &plan)?;
        self.observers.emit_load(&LoadEvent {
            id: candidate.id,
            elements_left: self.candidates.len(),
        });
        Ok(())
    }
}

fn build_plan<E>(
    actuator: &dyn ContentSwap<E>,
    element: &E,
    settings: &LazyLoadSettings<E>,
) -> SwapPlan {
    let current_src = actuator.attribute(element, "src");
    let original = actuator.attribute(element, &settings.original_attribute_name());
    let srcset = actuator.attribute(element, &settings.srcset_attribute_name());
    plan_swap(
        actuator.media_kind(element),
        SwapSource {
            current_src: current_src.as_deref(),
            original: original.as_deref(),
            srcset: srcset.as_deref(),
        },
        settings.effect,
        settings.effect_speed,
    )
}
