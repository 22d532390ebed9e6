//! YAML rule documents that configure the rarity engine.
//!
//! This crate provides:
//! - YAML-based rule definitions with serde deserialization
//!   (`TierConfig`, `NarrativeConfig`, `NarrativeTemplates`)
//! - Built-in defaults for every kind, mirrored in `data/rules/`
//! - Filesystem loader with two-pass (envelope, then kind) parsing
//! - Validation with structured errors and warnings

pub mod loader;
pub mod narrative_config;
pub mod schema;
pub mod template_config;
pub mod tier_config;
pub mod validation;
