use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;
use tracing::debug;

use crate::visibility::VisibilityController;

/// Identifies one load attempt of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket<K> {
    key: K,
    generation: u64,
}

impl<K> LoadTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Slot<G> {
    generation: u64,
    controller: Option<Rc<VisibilityController<G>>>,
}

impl<G> Default for Slot<G> {
    fn default() -> Self {
        Self {
            generation: 0,
            controller: None,
        }
    }
}

/// Live controller of every section, keyed by section id.
///
/// Each (re)load starts with [`begin`](Self::begin), which bumps the
/// section's generation and retires the controller it replaces. Only the
/// ticket of the latest generation may install its controller.
pub struct SectionRegistry<K, G> {
    slots: HashMap<K, Slot<G>>,
}

impl<K, G> Default for SectionRegistry<K, G> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug, G> SectionRegistry<K, G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: K) -> LoadTicket<K> {
        let slot = self.slots.entry(key.clone()).or_default();
        slot.generation += 1;
        if let Some(previous) = slot.controller.take() {
            previous.retire();
        }
        LoadTicket {
            key,
            generation: slot.generation,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket<K>) -> bool {
        self.slots
            .get(&ticket.key)
            .is_some_and(|slot| slot.generation == ticket.generation)
    }

    /// Store `controller` for the ticket's section; a stale ticket is
    /// refused and the controller retired.
    pub fn install(&mut self, ticket: &LoadTicket<K>, controller: Rc<VisibilityController<G>>) -> bool {
        match self.slots.get_mut(&ticket.key) {
            Some(slot) if slot.generation == ticket.generation => {
                if let Some(previous) = slot.controller.replace(controller) {
                    previous.retire();
                }
                true
            }
            _ => {
                debug!(section = ?ticket.key, generation = ticket.generation, "stale load dropped");
                controller.retire();
                false
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<Rc<VisibilityController<G>>> {
        self.slots.get(key).and_then(|slot| slot.controller.clone())
    }

    /// Every installed controller, for broadcast events such as resize.
    pub fn controllers(&self) -> Vec<(K, Rc<VisibilityController<G>>)> {
        self.slots
            .iter()
            .filter_map(|(key, slot)| slot.controller.clone().map(|c| (key.clone(), c)))
            .collect()
    }
}

/// Numbers successive requests of a single-target view (such as the details
/// modal) so that only the latest one may render.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, request: u64) -> bool {
        self.latest.get() == request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::FakeGrid;
    use crate::viewport::VisibilityPolicy;

    fn controller(cards: usize) -> Rc<VisibilityController<FakeGrid>> {
        Rc::new(VisibilityController::new(
            FakeGrid::with_cards(cards),
            1280,
            VisibilityPolicy::default(),
            None,
        ))
    }

    #[test]
    fn latest_ticket_wins() {
        let mut registry = SectionRegistry::new();
        let first = registry.begin("others");
        let second = registry.begin("others");

        assert!(!registry.is_current(&first));
        assert!(registry.is_current(&second));

        let stale = controller(3);
        assert!(!registry.install(&first, stale.clone()));
        assert!(stale.is_retired());
        assert!(registry.get(&"others").is_none());

        let fresh = controller(5);
        assert!(registry.install(&second, fresh.clone()));
        assert!(Rc::ptr_eq(&registry.get(&"others").unwrap(), &fresh));
    }

    #[test]
    fn reloading_a_section_retires_its_controller() {
        let mut registry = SectionRegistry::new();
        let ticket = registry.begin("top");
        let old = controller(12);
        registry.install(&ticket, old.clone());

        let _next = registry.begin("top");

        assert!(old.is_retired());
        assert!(registry.get(&"top").is_none());
    }

    #[test]
    fn sections_are_independent() {
        let mut registry = SectionRegistry::new();
        let top = registry.begin("top");
        let drama = registry.begin("drama");
        registry.install(&top, controller(12));
        registry.install(&drama, controller(12));

        let _ = registry.begin("drama");

        assert!(registry.is_current(&top));
        assert!(registry.get(&"top").is_some());
        assert_eq!(registry.controllers().len(), 1);
    }

    #[test]
    fn unknown_ticket_is_never_current() {
        let mut other = SectionRegistry::<&str, FakeGrid>::new();
        let ticket = other.begin("top");
        let registry = SectionRegistry::<&str, FakeGrid>::new();

        assert!(!registry.is_current(&ticket));
    }

    #[test]
    fn only_the_latest_request_may_render() {
        let requests = RequestSequence::new();
        let first = requests.issue();
        let second = requests.issue();

        assert!(!requests.is_latest(first));
        assert!(requests.is_latest(second));
    }
}
