//! Data-driven spell loading from JSON.
//!
//! Feature-gated behind `data-loader`. Provides JSON deserialization into
//! [`SpellRegistryBuilder`] for spell definitions kept in data files.

use crate::registry::{RegistryError, SpellRegistryBuilder};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level spell data structure for JSON deserialization.
#[derive(Debug, serde::Deserialize)]
pub struct SpellData {
    #[serde(default)]
    pub spells: Vec<SpellEntryData>,
}

/// JSON representation of a spell definition.
#[derive(Debug, serde::Deserialize)]
pub struct SpellEntryData {
    pub name: String,
    pub research_time: u32,
    /// Spells without an upgrade threshold upgrade on the next research step.
    #[serde(default)]
    pub upgrade_time: u32,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load spell definitions from a JSON string.
pub fn load_spells_json(json: &str) -> Result<SpellRegistryBuilder, DataLoadError> {
    let data: SpellData = serde_json::from_str(json)?;
    build_registry(data)
}

/// Load spell definitions from JSON bytes.
pub fn load_spells_json_bytes(bytes: &[u8]) -> Result<SpellRegistryBuilder, DataLoadError> {
    let data: SpellData = serde_json::from_slice(bytes)?;
    build_registry(data)
}

fn build_registry(data: SpellData) -> Result<SpellRegistryBuilder, DataLoadError> {
    let mut builder = SpellRegistryBuilder::new();
    for spell in &data.spells {
        builder.register_spell(&spell.name, spell.research_time, spell.upgrade_time)?;
    }
    Ok(builder)
}

// ===========================================================================
// Tests
// ===========================================================================
