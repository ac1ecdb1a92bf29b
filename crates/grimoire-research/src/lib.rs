//! Spell research for keeper players.
//!
//! Tracks which spells a player has access to, how far research on each has
//! progressed, and which spell is being researched right now.
//!
//! # Overview
//!
//! A [`SpellControl`] is created per player with the shared
//! [`SpellRegistry`](grimoire_core::registry::SpellRegistry) and a
//! [`SpellStore`](grimoire_core::keeper::SpellStore) that receives a mirrored
//! copy of every record. Game code makes spells available with
//! [`SpellControl::set_available`] and feeds research into the current target
//! each update with [`SpellControl::advance_research`]. When a spell is
//! discovered or upgraded the record is returned so the caller can place a
//! spellbook in the world.
//!
//! # Milestones
//!
//! Each spell has two milestones: discovery (after `research_time`) and
//! upgrade (after `upgrade_time`, counted from discovery). A single call
//! reaches at most one milestone; leftover research is dropped.
//!
//! # Target selection
//!
//! Undiscovered spells are always researched before discovered spells are
//! upgraded. Within each group, spells are taken in the order they became
//! available.
//!
//! # Listeners
//!
//! [`SpellListener`]s are registered as `Rc<RefCell<_>>` and called
//! synchronously in registration order. [`EventRecorder`] collects the
//! notifications as [`SpellEvent`] values for polling.

use grimoire_core::id::SpellId;

pub mod control;
pub mod listener;

pub use control::SpellControl;
pub use listener::{EventRecorder, SharedListener, SpellEvent, SpellListener};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Caller contract violations. Check [`SpellControl::has_active_research`]
/// and [`SpellControl::is_available`] first to avoid them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResearchError {
    #[error("no spell is being researched")]
    NoActiveResearch,

    #[error("spell {0:?} is not available to this keeper")]
    NotAvailable(SpellId),

    #[error("spell {0:?} has no definition in the registry")]
    UnknownSpell(SpellId),
}
