//! Serde types shared by every rule kind.
//!
//! A document is `apiVersion` + `kind` + `metadata` + `spec`. The header
//! ([`RuleEnvelope`]) is read first and decides which [`RuleDocument`]
//! variant the body is deserialized into.

mod document;
mod envelope;
mod kind;
mod metadata;

pub use document::RuleDocument;
pub use envelope::{RuleEnvelope, API_VERSION};
pub use kind::RuleKind;
pub use metadata::CommonMetadata;
