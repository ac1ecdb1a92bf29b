//! Grimoire Core -- shared data for keeper spell research.
//!
//! This crate holds the pieces every research system depends on: spell
//! identifiers, the immutable spell definition registry, and the keeper's
//! persistent store of per-player spell records.
//!
//! # Key Types
//!
//! - [`registry::SpellRegistry`] -- Immutable spell definitions with their
//!   research and upgrade thresholds (frozen at startup).
//! - [`keeper::PlayerSpell`] -- One player's research record for one spell.
//! - [`keeper::Keeper`] -- The owning player and its mirrored spell records.
//! - [`keeper::SpellStore`] -- Anything that receives mirrored records.
//! - [`data_loader`] -- JSON loading of spell definitions (`data-loader`
//!   feature).

#[cfg(feature = "data-loader")]
pub mod data_loader;
pub mod id;
pub mod keeper;
pub mod registry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
