//! Semantic checks that run after a document has parsed.
//!
//! Tier breakpoints must cover `[0, 100]` in strictly descending order,
//! trend multipliers must be finite with `down <= up`, milestones must be
//! ascending, and every template must compile.

pub(crate) mod config_checks;

use serde::{Deserialize, Serialize};

use crate::loader::{parse_document, RuleError};
use crate::schema::RuleDocument;

/// Outcome of checking one document. Errors make the document unusable,
/// warnings are advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A problem at a YAML-path-like location such as `spec.breakpoints.rare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub path: String,
    pub message: String,
}

pub type ValidationError = Finding;
pub type ValidationWarning = Finding;

fn finding(path: impl Into<String>, message: impl Into<String>) -> Finding {
    Finding {
        path: path.into(),
        message: message.into(),
    }
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(finding(path, message));
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(finding(path, message));
    }

    /// Warnings when valid, otherwise every error folded into one
    /// [`RuleError::Validation`] naming `rule_id`.
    pub fn into_result(self, rule_id: &str) -> Result<Vec<ValidationWarning>, RuleError> {
        if self.valid {
            return Ok(self.warnings);
        }
        let details = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(RuleError::Validation(format!("rule '{rule_id}' is invalid: {details}")))
    }
}

pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    match doc {
        RuleDocument::TierConfig(rule) => config_checks::validate_tier_config(rule, &mut result),
        RuleDocument::NarrativeConfig(rule) => config_checks::validate_narrative_config(rule, &mut result),
        RuleDocument::NarrativeTemplates(rule) => config_checks::validate_narrative_templates(rule, &mut result),
    }
    result
}

/// Parse then validate. A document that does not parse yields a single
/// error at the root path.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    match parse_document(yaml) {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", e.to_string());
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_rules_are_valid() {
        for yaml in [
            include_str!("../../../../data/rules/tiers/tier-config.yml"),
            include_str!("../../../../data/rules/narrative/narrative-config.yml"),
            include_str!("../../../../data/rules/narrative/templates.yml"),
        ] {
            let result = validate_yaml(yaml);
            assert!(result.valid, "shipped rule should be valid: {:?}", result.errors);
            assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        }
    }

    #[test]
    fn parse_error_becomes_validation_error() {
        let result = validate_yaml("kind: [not, a, rule");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn into_result_joins_errors() {
        let mut result = ValidationResult::new();
        result.error("spec.a", "first");
        result.error("spec.b", "second");
        let err = result.into_result("some-rule").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("some-rule"));
        assert!(msg.contains("spec.a: first"));
        assert!(msg.contains("spec.b: second"));
    }
}
