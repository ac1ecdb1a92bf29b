//! Keeper-side spell bookkeeping.
//!
//! A [`PlayerSpell`] is the per-player research record for one spell. The
//! [`Keeper`] holds the persistent copy of every record so that other systems
//! (save games, UI, networking) can see research state without going through
//! the research controller. Anything that wants to receive those mirrored
//! records implements [`SpellStore`].

use crate::id::{PlayerId, SpellId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// PlayerSpell
// ---------------------------------------------------------------------------

/// Research state of one spell for one player.
///
/// `upgraded` is never set while `discovered` is false: the setters keep the
/// two flags consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpell {
    spell_id: SpellId,
    research: u32,
    discovered: bool,
    upgraded: bool,
}

impl PlayerSpell {
    /// A fresh record: no progress, not discovered, not upgraded.
    pub fn new(spell_id: SpellId) -> Self {
        Self {
            spell_id,
            research: 0,
            discovered: false,
            upgraded: false,
        }
    }

    pub fn spell_id(&self) -> SpellId {
        self.spell_id
    }

    /// Accumulated research toward the next milestone.
    pub fn research(&self) -> u32 {
        self.research
    }

    pub fn set_research(&mut self, research: u32) {
        self.research = research;
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Clearing discovery also clears the upgrade.
    pub fn set_discovered(&mut self, discovered: bool) {
        self.discovered = discovered;
        if !discovered {
            self.upgraded = false;
        }
    }

    pub fn is_upgraded(&self) -> bool {
        self.upgraded
    }

    /// Upgrading implies discovery.
    pub fn set_upgraded(&mut self, upgraded: bool) {
        self.upgraded = upgraded;
        if upgraded {
            self.discovered = true;
        }
    }
}

// ---------------------------------------------------------------------------
// SpellStore
// ---------------------------------------------------------------------------

/// Receives mirrored spell records, keyed by spell id.
pub trait SpellStore {
    /// Insert or replace the record for `spell.spell_id()`.
    fn put_spell(&mut self, spell: PlayerSpell);

    /// Remove the record for `id`, returning it if present.
    fn remove_spell(&mut self, id: SpellId) -> Option<PlayerSpell>;
}

impl<S: SpellStore + ?Sized> SpellStore for &mut S {
    fn put_spell(&mut self, spell: PlayerSpell) {
        (**self).put_spell(spell);
    }

    fn remove_spell(&mut self, id: SpellId) -> Option<PlayerSpell> {
        (**self).remove_spell(id)
    }
}

// ---------------------------------------------------------------------------
// Keeper
// ---------------------------------------------------------------------------

/// A player and its persistent spell records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keeper {
    id: PlayerId,
    player_spells: HashMap<SpellId, PlayerSpell>,
}

impl Keeper {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            player_spells: HashMap::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn player_spells(&self) -> &HashMap<SpellId, PlayerSpell> {
        &self.player_spells
    }

    pub fn player_spell(&self, id: SpellId) -> Option<&PlayerSpell> {
        self.player_spells.get(&id)
    }
}

impl SpellStore for Keeper {
    fn put_spell(&mut self, spell: PlayerSpell) {
        self.player_spells.insert(spell.spell_id(), spell);
    }

    fn remove_spell(&mut self, id: SpellId) -> Option<PlayerSpell> {
        self.player_spells.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_blank() {
        let spell = PlayerSpell::new(SpellId(3));
        assert_eq!(spell.spell_id(), SpellId(3));
        assert_eq!(spell.research(), 0);
        assert!(!spell.is_discovered());
        assert!(!spell.is_upgraded());
    }

    #[test]
    fn upgrade_implies_discovery() {
        let mut spell = PlayerSpell::new(SpellId(0));
        spell.set_upgraded(true);
        assert!(spell.is_discovered());
        assert!(spell.is_upgraded());
    }

    #[test]
    fn undiscover_clears_upgrade() {
        let mut spell = PlayerSpell::new(SpellId(0));
        spell.set_upgraded(true);
        spell.set_discovered(false);
        assert!(!spell.is_discovered());
        assert!(!spell.is_upgraded());
    }

    #[test]
    fn keeper_put_replaces_by_id() {
        let mut keeper = Keeper::new(PlayerId(1));
        keeper.put_spell(PlayerSpell::new(SpellId(2)));
        let mut updated = PlayerSpell::new(SpellId(2));
        updated.set_research(40);
        keeper.put_spell(updated);

        assert_eq!(keeper.player_spells().len(), 1);
        assert_eq!(keeper.player_spell(SpellId(2)).unwrap().research(), 40);
    }

    #[test]
    fn store_through_mut_reference() {
        fn fill<S: SpellStore>(mut store: S) {
            store.put_spell(PlayerSpell::new(SpellId(7)));
        }

        let mut keeper = Keeper::new(PlayerId(0));
        fill(&mut keeper);
        assert!(keeper.player_spell(SpellId(7)).is_some());
        assert!(keeper.remove_spell(SpellId(7)).is_some());
        assert!(keeper.remove_spell(SpellId(7)).is_none());
    }

    #[test]
    fn player_spell_serializes() {
        let mut spell = PlayerSpell::new(SpellId(4));
        spell.set_discovered(true);
        spell.set_research(12);

        let json = serde_json::to_string(&spell).unwrap();
        let restored: PlayerSpell = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, spell);
    }
}
