//! The per-player spell research controller.

use crate::ResearchError;
use crate::listener::{SharedListener, SpellListener};
use grimoire_core::id::SpellId;
use grimoire_core::keeper::{PlayerSpell, SpellStore};
use grimoire_core::registry::SpellRegistry;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// SpellControl
// ---------------------------------------------------------------------------

/// Holds and manages one player's spells.
///
/// Research status lives here rather than in the world: a spell keeps its
/// partial progress even while nothing is producing research. Only when a
/// milestone is reached does [`advance_research`](Self::advance_research)
/// hand the record back so the caller can put a spellbook into the world.
///
/// Every record change is mirrored into the store `S` before listeners are
/// notified. Pass `&mut Keeper` to mirror into a keeper owned elsewhere.
pub struct SpellControl<S: SpellStore> {
    registry: Arc<SpellRegistry>,
    store: S,

    /// Available spells in the order they became available. The order breaks
    /// ties when picking the next research target.
    spells: Vec<PlayerSpell>,

    /// The spell currently accruing research. Always present in `spells`.
    current_research: Option<SpellId>,

    /// Notified in registration order.
    listeners: Vec<SharedListener>,
}

impl<S: SpellStore + std::fmt::Debug> std::fmt::Debug for SpellControl<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellControl")
            .field("store", &self.store)
            .field("spells", &self.spells)
            .field("current_research", &self.current_research)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: SpellStore> SpellControl<S> {
    /// Create a controller with no available spells.
    pub fn new(registry: Arc<SpellRegistry>, store: S) -> Self {
        Self {
            registry,
            store,
            spells: Vec::new(),
            current_research: None,
            listeners: Vec::new(),
        }
    }

    // -- Availability --

    /// Make a spell available or unavailable to the player.
    ///
    /// Becoming available creates a fresh record, which becomes the research
    /// target only if nothing is being researched. Becoming unavailable
    /// discards the record and its progress; if it was the research target a
    /// new one is picked.
    ///
    /// Returns whether availability actually changed. Repeated calls with the
    /// same flag do nothing and notify nobody. Spells missing from the
    /// registry can never become available.
    pub fn set_available(&mut self, spell: SpellId, available: bool) -> bool {
        let record = match (available, self.position(spell)) {
            (true, None) if self.registry.get_spell(spell).is_none() => {
                tracing::warn!(
                    target: "grimoire::research",
                    spell = spell.0,
                    "research.unknown_spell"
                );
                return false;
            }
            (true, None) => {
                let record = PlayerSpell::new(spell);
                self.spells.push(record.clone());
                self.store.put_spell(record.clone());
                if self.current_research.is_none() {
                    self.current_research = Some(spell);
                }
                record
            }
            (false, Some(index)) => {
                let record = self.spells.remove(index);
                self.store.remove_spell(spell);
                if self.current_research == Some(spell) {
                    self.select_next_target();
                }
                record
            }
            _ => return false,
        };

        tracing::debug!(
            target: "grimoire::research",
            spell = spell.0,
            available,
            "research.availability_changed"
        );

        broadcast(&self.listeners, |listener| {
            if available {
                listener.on_added(&record);
            } else {
                listener.on_removed(&record);
            }
        });
        true
    }

    /// Whether the player currently has access to `spell`.
    pub fn is_available(&self, spell: SpellId) -> bool {
        self.position(spell).is_some()
    }

    // -- Research --

    /// Set a spell's discovery flag directly.
    ///
    /// Discovering the current research target moves research on to the next
    /// target. Listeners always receive `on_research_status_changed`, even if
    /// the flag already had this value.
    pub fn set_discovered(
        &mut self,
        spell: SpellId,
        discovered: bool,
    ) -> Result<(), ResearchError> {
        let index = self
            .position(spell)
            .ok_or(ResearchError::NotAvailable(spell))?;

        let record = &mut self.spells[index];
        record.set_discovered(discovered);
        self.store.put_spell(record.clone());

        if discovered && self.current_research == Some(spell) {
            self.select_next_target();
        }

        let record = &self.spells[index];
        broadcast(&self.listeners, |listener| {
            listener.on_research_status_changed(record)
        });
        Ok(())
    }

    /// Put `amount` of research into the current target.
    ///
    /// Returns the record when this step discovered or upgraded it, which is
    /// the caller's cue to create the spellbook. At most one milestone is
    /// reached per call and any excess research is dropped.
    pub fn advance_research(
        &mut self,
        amount: u32,
    ) -> Result<Option<PlayerSpell>, ResearchError> {
        let spell = self
            .current_research
            .ok_or(ResearchError::NoActiveResearch)?;
        let def = self
            .registry
            .get_spell(spell)
            .ok_or(ResearchError::UnknownSpell(spell))?;
        let (research_time, upgrade_time) = (def.research_time, def.upgrade_time);
        let index = self
            .position(spell)
            .ok_or(ResearchError::NotAvailable(spell))?;

        let record = &mut self.spells[index];
        let completed = research_step(record, amount, research_time, upgrade_time);
        self.store.put_spell(record.clone());

        let record = &self.spells[index];
        broadcast(&self.listeners, |listener| {
            listener.on_research_status_changed(record)
        });

        if !completed {
            return Ok(None);
        }

        let record = record.clone();
        tracing::info!(
            target: "grimoire::research",
            spell = spell.0,
            discovered = record.is_discovered(),
            upgraded = record.is_upgraded(),
            "research.milestone"
        );
        self.select_next_target();
        Ok(Some(record))
    }

    /// Whether there is anything left to research.
    pub fn has_active_research(&self) -> bool {
        self.current_research.is_some()
    }

    /// The record currently accruing research.
    pub fn current_research(&self) -> Option<&PlayerSpell> {
        self.current_research.and_then(|id| self.get(id))
    }

    // -- Spellbooks --

    /// A spellbook for `spell` appeared in the world: discover the spell, or
    /// upgrade it if already discovered. Ignored for unavailable spells.
    pub fn on_spellbook_added(&mut self, spell: SpellId) {
        let Some(index) = self.position(spell) else {
            return;
        };

        let record = &mut self.spells[index];
        if !record.is_discovered() {
            record.set_discovered(true);
        } else {
            record.set_upgraded(true);
        }
        self.store.put_spell(record.clone());
        self.retarget_after_spellbook(spell);

        let record = &self.spells[index];
        broadcast(&self.listeners, |listener| listener.on_added(record));
    }

    /// A spellbook for `spell` was lost: drop the upgrade, or the discovery
    /// if not upgraded. Ignored for unavailable spells.
    pub fn on_spellbook_removed(&mut self, spell: SpellId) {
        let Some(index) = self.position(spell) else {
            return;
        };

        let record = &mut self.spells[index];
        if record.is_upgraded() {
            record.set_upgraded(false);
        } else {
            record.set_discovered(false);
        }
        self.store.put_spell(record.clone());
        self.retarget_after_spellbook(spell);

        let record = &self.spells[index];
        broadcast(&self.listeners, |listener| listener.on_removed(record));
    }

    // -- Listeners --

    /// Register a listener. The same listener may be registered more than
    /// once and is then notified once per registration.
    pub fn add_listener(&mut self, listener: SharedListener) {
        self.listeners.push(listener);
    }

    /// Unregister the first registration of `listener`, matched by identity.
    /// Returns false if it was not registered.
    pub fn remove_listener<L: SpellListener + ?Sized>(
        &mut self,
        listener: &Rc<RefCell<L>>,
    ) -> bool {
        let target = Rc::as_ptr(listener) as *const ();
        let Some(index) = self
            .listeners
            .iter()
            .position(|l| Rc::as_ptr(l) as *const () == target)
        else {
            return false;
        };
        self.listeners.remove(index);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -- Queries --

    /// The record for `spell`, if available.
    pub fn get(&self, spell: SpellId) -> Option<&PlayerSpell> {
        self.spells.iter().find(|s| s.spell_id() == spell)
    }

    /// Available spells in the order they became available.
    pub fn spells(&self) -> impl Iterator<Item = &PlayerSpell> {
        self.spells.iter()
    }

    pub fn available_count(&self) -> usize {
        self.spells.len()
    }

    pub fn registry(&self) -> &SpellRegistry {
        &self.registry
    }

    /// The store receiving mirrored records.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give up the controller and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    // -- Internal helpers --

    fn position(&self, spell: SpellId) -> Option<usize> {
        self.spells.iter().position(|s| s.spell_id() == spell)
    }

    /// Spellbook changes retarget when they touch the current target, or when
    /// research had run dry and may now have something to do.
    fn retarget_after_spellbook(&mut self, spell: SpellId) {
        match self.current_research {
            None => self.select_next_target(),
            Some(current) if current == spell => self.select_next_target(),
            Some(_) => {}
        }
    }

    /// Discovering new spells always wins over upgrading known ones; within
    /// each group the earliest available spell goes first.
    fn select_next_target(&mut self) {
        let next = self
            .spells
            .iter()
            .find(|s| !s.is_discovered())
            .or_else(|| {
                self.spells
                    .iter()
                    .find(|s| s.is_discovered() && !s.is_upgraded())
            })
            .map(PlayerSpell::spell_id);

        if next != self.current_research {
            tracing::debug!(
                target: "grimoire::research",
                previous = ?self.current_research,
                next = ?next,
                "research.target"
            );
        }
        self.current_research = next;
    }
}

/// Apply `amount` of research to `spell`. Returns true if a milestone was
/// reached, in which case progress restarts at zero.
fn research_step(
    spell: &mut PlayerSpell,
    amount: u32,
    research_time: u32,
    upgrade_time: u32,
) -> bool {
    let progress = spell.research().saturating_add(amount);
    spell.set_research(progress);

    if spell.is_discovered() && progress >= upgrade_time {
        spell.set_upgraded(true);
        spell.set_research(0);
        true
    } else if !spell.is_discovered() && progress >= research_time {
        spell.set_discovered(true);
        spell.set_research(0);
        true
    } else {
        false
    }
}

fn broadcast(listeners: &[SharedListener], mut notify: impl FnMut(&mut dyn SpellListener)) {
    for listener in listeners {
        notify(&mut *listener.borrow_mut());
    }
}

// ===========================================================================
// Tests
// ===========================================================================
