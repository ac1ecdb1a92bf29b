//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::id::{PlayerId, SpellId};
use crate::keeper::Keeper;
use crate::registry::{SpellRegistry, SpellRegistryBuilder};
use std::sync::Arc;

// ===========================================================================
// Spell constructors (ids match `standard_registry` registration order)
// ===========================================================================

pub fn create_imp() -> SpellId {
    SpellId(0)
}
pub fn sight_of_evil() -> SpellId {
    SpellId(1)
}
pub fn heal() -> SpellId {
    SpellId(2)
}
pub fn lightning() -> SpellId {
    SpellId(3)
}

// ===========================================================================
// Registries
// ===========================================================================

/// Four spells with distinct thresholds:
///
/// | spell         | research | upgrade |
/// |---------------|----------|---------|
/// | create_imp    | 100      | 50      |
/// | sight_of_evil | 200      | 300     |
/// | heal          | 150      | 400     |
/// | lightning     | 500      | 1000    |
pub fn standard_registry() -> Arc<SpellRegistry> {
    let mut b = SpellRegistryBuilder::new();
    for (name, research, upgrade) in [
        ("create_imp", 100, 50),
        ("sight_of_evil", 200, 300),
        ("heal", 150, 400),
        ("lightning", 500, 1000),
    ] {
        b.register_spell(name, research, upgrade)
            .expect("standard spell names are unique");
    }
    Arc::new(b.build())
}

/// A registry of `count` spells named `spell_{i}`, each with the given
/// thresholds.
pub fn uniform_registry(count: u32, research: u32, upgrade: u32) -> Arc<SpellRegistry> {
    let mut b = SpellRegistryBuilder::new();
    for i in 0..count {
        b.register_spell(&format!("spell_{i}"), research, upgrade)
            .expect("generated spell names are unique");
    }
    Arc::new(b.build())
}

pub fn keeper() -> Keeper {
    Keeper::new(PlayerId(1))
}
