//! Engine facade: compiled rules plus the classify and narrate entry points.
//!
//! An engine is immutable once built. Build it from built-in defaults, from
//! already-parsed rule documents, or from a rules directory on disk.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use rarity_core::{Config, NarrativeRecord, RarityScore, TemporalWindowSet, Timeframe};
use rarity_rules::loader::{LoadStatus, RuleLoader};
use rarity_rules::narrative_config::CompiledNarrativeConfig;
use rarity_rules::schema::RuleDocument;
use rarity_rules::template_config::CompiledTemplates;
use rarity_rules::tier_config::CompiledTierConfig;
use rarity_rules::validation::validate_document;

use crate::classifier::RarityClassifier;
use crate::error::{EngineError, Result};
use crate::narrative::NarrativeGenerator;

/// Narrative record for one window with its rarity score alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowReport {
    #[serde(flatten)]
    pub record: NarrativeRecord,
    pub rarity: RarityScore,
}

/// Combined output for a full window set, in `[week, month, year, allTime]` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeReport {
    pub windows: [WindowReport; 4],
}

impl NarrativeReport {
    pub fn get(&self, timeframe: Timeframe) -> &WindowReport {
        &self.windows[timeframe as usize]
    }
}

#[derive(Debug, Default)]
pub struct RarityEngine {
    classifier: RarityClassifier,
    generator: NarrativeGenerator,
}

impl RarityEngine {
    pub fn new(classifier: RarityClassifier, generator: NarrativeGenerator) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    /// Compile an engine from rule documents.
    ///
    /// Disabled documents are ignored. Documents are applied in id order and
    /// the last enabled document of each kind wins. Kinds with no document
    /// keep their built-in defaults. Any invalid document is an error.
    pub fn from_documents<'a, I>(documents: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a RuleDocument>,
    {
        let mut docs: Vec<&RuleDocument> = documents
            .into_iter()
            .filter(|d| d.metadata().enabled)
            .collect();
        docs.sort_by(|a, b| a.metadata().id.cmp(&b.metadata().id));

        let mut tiers: Option<(&str, CompiledTierConfig)> = None;
        let mut config: Option<(&str, CompiledNarrativeConfig)> = None;
        let mut templates: Option<(&str, CompiledTemplates)> = None;

        for doc in docs {
            let id = doc.metadata().id.as_str();
            for warning in validate_document(doc).into_result(id)? {
                warn!(rule_id = id, path = %warning.path, "{}", warning.message);
            }

            let replaced = match doc {
                RuleDocument::TierConfig(rule) => tiers.replace((id, rule.compile())).map(|(prev, _)| prev),
                RuleDocument::NarrativeConfig(rule) => config.replace((id, rule.compile())).map(|(prev, _)| prev),
                RuleDocument::NarrativeTemplates(rule) => {
                    templates.replace((id, rule.compile())).map(|(prev, _)| prev)
                }
            };
            if let Some(prev) = replaced {
                warn!(kind = %doc.kind(), rule_id = id, replaced = prev, "multiple rule documents of one kind, last id wins");
            }
        }

        info!(
            tiers = tiers.as_ref().map_or("builtin", |(id, _)| *id),
            narrative = config.as_ref().map_or("builtin", |(id, _)| *id),
            templates = templates.as_ref().map_or("builtin", |(id, _)| *id),
            "rarity engine compiled"
        );

        Ok(Self::new(
            RarityClassifier::new(tiers.map(|(_, t)| t).unwrap_or_default()),
            NarrativeGenerator::new(
                config.map(|(_, c)| c).unwrap_or_default(),
                templates.map(|(_, t)| t).unwrap_or_default(),
            ),
        ))
    }

    /// Load every rule document under `dir` and compile an engine.
    ///
    /// Files that fail to parse are logged and skipped, unless `strict` is
    /// set, in which case the first failure is returned.
    pub fn from_rules_dir(dir: &Path, strict: bool) -> Result<Self> {
        let mut loader = RuleLoader::new(dir.to_path_buf());
        let results = loader.load_all()?;

        for result in &results {
            if let LoadStatus::Failed { error } = &result.status {
                if strict {
                    return Err(EngineError::LoadFailed {
                        path: result.path.clone(),
                        error: error.clone(),
                    });
                }
                warn!(path = %result.path.display(), error = %error, "skipping rule file");
            }
        }

        Self::from_documents(loader.documents())
    }

    /// Built-in defaults unless the config names a rules directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.rules.rules_dir {
            Some(dir) => Self::from_rules_dir(dir, config.rules.strict),
            None => Ok(Self::default()),
        }
    }

    pub fn classifier(&self) -> &RarityClassifier {
        &self.classifier
    }

    pub fn generator(&self) -> &NarrativeGenerator {
        &self.generator
    }

    pub fn classify(&self, matches: u64, total: u64) -> RarityScore {
        self.classifier.classify(matches, total)
    }

    pub fn generate(&self, windows: &TemporalWindowSet) -> [NarrativeRecord; 4] {
        self.generator.generate(windows)
    }

    /// Narratives and rarity scores for every window.
    pub fn report(&self, windows: &TemporalWindowSet) -> NarrativeReport {
        let records = self.generate(windows);
        let windows = records.map(|record| {
            let rarity = self.classifier.classify_window(windows.get(record.timeframe));
            WindowReport { record, rarity }
        });
        NarrativeReport { windows }
    }
}
