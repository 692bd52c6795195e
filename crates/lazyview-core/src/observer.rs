//! Appear and load notifications.
//!
//! Observers are plain callbacks registered on the loader. They are called
//! synchronously, in registration order, from inside the pass that produced
//! the event.

use std::rc::Rc;

use crate::loader::CandidateId;

/// A candidate was found inside the visible area (or was triggered).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppearEvent {
    pub id: CandidateId,
    /// Candidates pending when the pass finished scanning, this one included.
    /// Every appear of one pass carries the same count.
    pub elements_left: usize,
}

/// A candidate's content swap was applied and it left the candidate set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadEvent {
    pub id: CandidateId,
    /// Candidates still pending after this one was removed.
    pub elements_left: usize,
}

/// Handle returned by observer registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

pub(crate) struct Observers {
    appear: Vec<(ObserverId, Rc<dyn Fn(&AppearEvent)>)>,
    load: Vec<(ObserverId, Rc<dyn Fn(&LoadEvent)>)>,
    next_id: u64,
}

impl Default for Observers {
    fn default() -> Self {
        Self {
            appear: Vec::new(),
            load: Vec::new(),
            next_id: 1,
        }
    }
}

impl Observers {
    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn add_appear(&mut self, callback: Rc<dyn Fn(&AppearEvent)>) -> ObserverId {
        let id = self.next_id();
        self.appear.push((id, callback));
        id
    }

    pub(crate) fn add_load(&mut self, callback: Rc<dyn Fn(&LoadEvent)>) -> ObserverId {
        let id = self.next_id();
        self.load.push((id, callback));
        id
    }

    /// Returns true if something was removed.
    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.appear.len() + self.load.len();
        self.appear.retain(|(observer, _)| *observer != id);
        self.load.retain(|(observer, _)| *observer != id);
        before != self.appear.len() + self.load.len()
    }

    pub(crate) fn emit_appear(&self, event: &AppearEvent) {
        for (_, callback) in &self.appear {
            callback(event);
        }
    }

    pub(crate) fn emit_load(&self, event: &LoadEvent) {
        for (_, callback) in &self.load {
            callback(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.appear.len() + self.load.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn emits_in_registration_order_and_removes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();

        let first = {
            let log = Rc::clone(&log);
            observers.add_appear(Rc::new(move |event: &AppearEvent| log.borrow_mut().push(("first", event.elements_left))))
        };
        {
            let log = Rc::clone(&log);
            observers.add_appear(Rc::new(move |event: &AppearEvent| log.borrow_mut().push(("second", event.elements_left))));
        }

        let event = AppearEvent {
            id: CandidateId::from_raw(7),
            elements_left: 3,
        };
        observers.emit_appear(&event);
        assert_eq!(*log.borrow(), vec![("first", 3), ("second", 3)]);

        assert!(observers.remove(first));
        assert!(!observers.remove(first));
        observers.emit_appear(&event);
        assert_eq!(log.borrow().len(), 3);
        assert_eq!(observers.len(), 1);
    }
}
