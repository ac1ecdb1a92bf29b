//! Observers of spell research state.
//!
//! Listeners are called synchronously, in registration order, from inside the
//! [`SpellControl`](crate::SpellControl) operation that caused the change.

use grimoire_core::keeper::PlayerSpell;
use std::cell::RefCell;
use std::rc::Rc;

/// Receives spell research notifications.
///
/// All methods default to no-ops so listeners only override what they need.
pub trait SpellListener {
    /// A spell became available, or a spellbook for it appeared in the world.
    fn on_added(&mut self, spell: &PlayerSpell) {
        let _ = spell;
    }

    /// A spell stopped being available, or its spellbook was lost.
    fn on_removed(&mut self, spell: &PlayerSpell) {
        let _ = spell;
    }

    /// Research progress or discovery state of a spell was touched. Sent even
    /// when nothing actually changed.
    fn on_research_status_changed(&mut self, spell: &PlayerSpell) {
        let _ = spell;
    }
}

/// A registered listener. Identity is the allocation, so the same `Rc` must
/// be handed back to remove it.
pub type SharedListener = Rc<RefCell<dyn SpellListener>>;

// ---------------------------------------------------------------------------
// Recorded events
// ---------------------------------------------------------------------------

/// A listener notification captured as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellEvent {
    Added(PlayerSpell),
    Removed(PlayerSpell),
    ResearchStatusChanged(PlayerSpell),
}

impl SpellEvent {
    /// The record carried by this event.
    pub fn spell(&self) -> &PlayerSpell {
        match self {
            SpellEvent::Added(spell)
            | SpellEvent::Removed(spell)
            | SpellEvent::ResearchStatusChanged(spell) => spell,
        }
    }
}

/// A listener that records every notification for later draining. Useful
/// for UI layers that poll once per frame, and for tests.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<SpellEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder already wrapped for registration.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Drain all recorded events. Returns events and clears the internal list.
    pub fn drain_events(&mut self) -> Vec<SpellEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a read-only view of recorded events.
    pub fn pending_events(&self) -> &[SpellEvent] {
        &self.events
    }
}

impl SpellListener for EventRecorder {
    fn on_added(&mut self, spell: &PlayerSpell) {
        self.events.push(SpellEvent::Added(spell.clone()));
    }

    fn on_removed(&mut self, spell: &PlayerSpell) {
        self.events.push(SpellEvent::Removed(spell.clone()));
    }

    fn on_research_status_changed(&mut self, spell: &PlayerSpell) {
        self.events.push(SpellEvent::ResearchStatusChanged(spell.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_core::id::SpellId;

    #[test]
    fn recorder_keeps_order_and_drains() {
        let mut recorder = EventRecorder::new();
        let spell = PlayerSpell::new(SpellId(1));

        recorder.on_added(&spell);
        recorder.on_research_status_changed(&spell);
        recorder.on_removed(&spell);

        assert_eq!(recorder.pending_events().len(), 3);
        let events = recorder.drain_events();
        assert_eq!(
            events,
            vec![
                SpellEvent::Added(spell.clone()),
                SpellEvent::ResearchStatusChanged(spell.clone()),
                SpellEvent::Removed(spell.clone()),
            ]
        );
        assert!(recorder.pending_events().is_empty());
    }

    #[test]
    fn default_methods_are_no_ops() {
        struct Silent;
        impl SpellListener for Silent {}

        let mut silent = Silent;
        silent.on_added(&PlayerSpell::new(SpellId(0)));
    }

    #[test]
    fn event_exposes_its_spell() {
        let event = SpellEvent::Removed(PlayerSpell::new(SpellId(9)));
        assert_eq!(event.spell().spell_id(), SpellId(9));
    }
}
