use crate::id::SpellId;
use std::collections::HashMap;

/// A keeper spell definition. Read-only once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellDef {
    pub id: SpellId,
    pub name: String,
    /// Research effort needed to discover the spell.
    pub research_time: u32,
    /// Research effort needed to upgrade an already discovered spell.
    pub upgrade_time: u32,
}

/// Builder for constructing an immutable [`SpellRegistry`].
/// Two-phase lifecycle: registration/mutation -> finalization.
#[derive(Debug, Default)]
pub struct SpellRegistryBuilder {
    spells: Vec<SpellDef>,
    name_to_id: HashMap<String, SpellId>,
}

impl SpellRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spell. Returns its ID, or an error if the name is taken.
    pub fn register_spell(
        &mut self,
        name: &str,
        research_time: u32,
        upgrade_time: u32,
    ) -> Result<SpellId, RegistryError> {
        if self.name_to_id.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let id = SpellId(self.spells.len() as u32);
        self.spells.push(SpellDef {
            id,
            name: name.to_string(),
            research_time,
            upgrade_time,
        });
        self.name_to_id.insert(name.to_string(), id);
        Ok(id)
    }

    /// Mutate an existing spell by name before the registry is frozen.
    /// The id and name are restored afterwards.
    pub fn mutate_spell<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut SpellDef),
    {
        let id = self
            .name_to_id
            .get(name)
            .copied()
            .ok_or(RegistryError::NotFound(name.to_string()))?;
        let spell = &mut self.spells[id.0 as usize];
        f(spell);
        spell.id = id;
        spell.name = name.to_string();
        Ok(())
    }

    /// Lookup spell ID by name.
    pub fn spell_id(&self, name: &str) -> Option<SpellId> {
        self.name_to_id.get(name).copied()
    }

    /// Finalize and build the immutable registry.
    pub fn build(self) -> SpellRegistry {
        SpellRegistry {
            spells: self.spells,
            name_to_id: self.name_to_id,
        }
    }
}

/// Immutable spell registry. Frozen after build(). Thread-safe to share.
#[derive(Debug, Clone)]
pub struct SpellRegistry {
    spells: Vec<SpellDef>,
    name_to_id: HashMap<String, SpellId>,
}

impl SpellRegistry {
    pub fn get_spell(&self, id: SpellId) -> Option<&SpellDef> {
        self.spells.get(id.0 as usize)
    }

    pub fn spell_id(&self, name: &str) -> Option<SpellId> {
        self.name_to_id.get(name).copied()
    }

    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }

    /// All spells in registration order.
    pub fn spells(&self) -> impl Iterator<Item = &SpellDef> {
        self.spells.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate spell name: {0}")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_builder() -> SpellRegistryBuilder {
        let mut b = SpellRegistryBuilder::new();
        b.register_spell("possession", 0, 0).unwrap();
        b.register_spell("create_imp", 1500, 20000).unwrap();
        b.register_spell("sight_of_evil", 8000, 30000).unwrap();
        b
    }

    #[test]
    fn register_and_build() {
        let reg = setup_builder().build();
        assert_eq!(reg.spell_count(), 3);
    }

    #[test]
    fn ids_follow_registration_order() {
        let reg = setup_builder().build();
        assert_eq!(reg.spell_id("possession"), Some(SpellId(0)));
        assert_eq!(reg.spell_id("sight_of_evil"), Some(SpellId(2)));
        let names: Vec<&str> = reg.spells().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["possession", "create_imp", "sight_of_evil"]);
    }

    #[test]
    fn lookup_by_name() {
        let reg = setup_builder().build();
        let imp = reg.get_spell(reg.spell_id("create_imp").unwrap()).unwrap();
        assert_eq!(imp.research_time, 1500);
        assert_eq!(imp.upgrade_time, 20000);
        assert!(reg.spell_id("nonexistent").is_none());
    }

    #[test]
    fn duplicate_name_fails() {
        let mut b = setup_builder();
        match b.register_spell("create_imp", 1, 1) {
            Err(RegistryError::DuplicateName(name)) => assert_eq!(name, "create_imp"),
            other => panic!("expected DuplicateName, got: {other:?}"),
        }
    }

    #[test]
    fn mutate_spell_keeps_identity() {
        let mut b = setup_builder();
        b.mutate_spell("create_imp", |spell| {
            spell.research_time = 10;
            spell.name = "renamed".to_string();
        })
        .unwrap();
        let reg = b.build();
        let imp = reg.get_spell(SpellId(1)).unwrap();
        assert_eq!(imp.research_time, 10);
        assert_eq!(imp.name, "create_imp");
        assert_eq!(imp.id, SpellId(1));
    }

    #[test]
    fn mutate_nonexistent_fails() {
        let mut b = setup_builder();
        let result = b.mutate_spell("nonexistent", |_| {});
        match result {
            Err(RegistryError::NotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn registry_get_nonexistent_returns_none() {
        let reg = setup_builder().build();
        assert!(reg.get_spell(SpellId(999)).is_none());
    }

    #[test]
    fn empty_registry_builds_successfully() {
        let reg = SpellRegistryBuilder::new().build();
        assert_eq!(reg.spell_count(), 0);
    }
}
