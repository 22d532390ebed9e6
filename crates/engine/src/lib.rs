//! Temporal rarity engine.
//!
//! Classifies how rare an action is across four time windows and turns the
//! window counts into short, category-driven narratives. All behavior is
//! tuned through compiled rule documents from `rarity-rules`.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod narrative;
pub mod rules;
pub mod templating;
pub mod trend;

pub use classifier::{rarity_percentile, RarityClassifier};
pub use engine::{NarrativeReport, RarityEngine, WindowReport};
pub use error::{EngineError, Result};
pub use narrative::NarrativeGenerator;
