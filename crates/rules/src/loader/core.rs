//! Directory-backed rule loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::schema::{RuleDocument, RuleEnvelope, RuleKind};

use super::error::{LoadResult, LoadStatus, Result};

/// Parse one YAML document.
///
/// The text is read into a YAML tree once. The header is taken from that
/// tree to learn the kind, then the same tree is deserialized as that kind.
pub fn parse_document(contents: &str) -> Result<RuleDocument> {
    let tree: serde_yaml::Value = serde_yaml::from_str(contents)?;
    let envelope: RuleEnvelope = serde_yaml::from_value(tree.clone())?;
    envelope.into_document(tree)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml")
    )
}

/// Every file under `dir`, descending into subdirectories except hidden ones.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "cannot read rules directory");
            return Ok(());
        }
    };

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            if !is_hidden(&path) {
                collect_files(&path, out)?;
            }
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Rule documents found under one directory, keyed by `metadata.id`.
#[derive(Debug)]
pub struct RuleLoader {
    rules_dir: PathBuf,
    documents: BTreeMap<String, RuleDocument>,
}

impl RuleLoader {
    pub fn new(rules_dir: PathBuf) -> Self {
        Self {
            rules_dir,
            documents: BTreeMap::new(),
        }
    }

    /// Load every YAML file under the rules directory.
    ///
    /// Files are visited in path order, so when two files share an id the
    /// later path wins. A file that fails to parse is reported in its
    /// [`LoadResult`] and does not stop the scan.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut files = Vec::new();
        collect_files(&self.rules_dir, &mut files)?;
        files.sort();

        let results: Vec<LoadResult> = files
            .into_iter()
            .map(|path| {
                let status = self.load_path(&path);
                LoadResult { path, status }
            })
            .collect();

        let failed = results.iter().filter(|r| r.status.is_failed()).count();
        info!(
            dir = %self.rules_dir.display(),
            documents = self.documents.len(),
            failed,
            "rules loaded"
        );
        Ok(results)
    }

    fn load_path(&mut self, path: &Path) -> LoadStatus {
        if is_hidden(path) {
            return LoadStatus::Skipped {
                reason: "dotfile".to_string(),
            };
        }
        if !is_yaml(path) {
            return LoadStatus::Skipped {
                reason: "not a YAML file".to_string(),
            };
        }

        match self.load_file(path) {
            Ok(doc) => {
                let rule_id = doc.metadata().id.clone();
                let kind = doc.kind();
                debug!(rule_id = %rule_id, %kind, path = %path.display(), "loaded rule");
                if self.documents.insert(rule_id.clone(), doc).is_some() {
                    warn!(rule_id = %rule_id, path = %path.display(), "duplicate rule id, later file wins");
                }
                LoadStatus::Loaded { rule_id, kind }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load rule file");
                LoadStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        parse_document(&fs::read_to_string(path)?)
    }

    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    pub fn get(&self, id: &str) -> Option<&RuleDocument> {
        self.documents.get(id)
    }

    /// All loaded documents in id order.
    pub fn documents(&self) -> Vec<&RuleDocument> {
        self.documents.values().collect()
    }

    pub fn documents_of_kind(&self, kind: RuleKind) -> Vec<&RuleDocument> {
        self.documents.values().filter(|d| d.kind() == kind).collect()
    }

    /// Write `doc` to `<rules_dir>/<id>.yml` and track it.
    ///
    /// The YAML goes to a hidden temp file first and is renamed into place,
    /// so a reader never sees a half-written document.
    pub fn write_document(&mut self, doc: &RuleDocument) -> Result<PathBuf> {
        fs::create_dir_all(&self.rules_dir)?;

        let id = &doc.metadata().id;
        let path = self.rules_dir.join(format!("{id}.yml"));
        let staging = self.rules_dir.join(format!(".{id}.tmp"));

        fs::write(&staging, doc.to_yaml()?)?;
        fs::rename(&staging, &path)?;
        info!(rule_id = %id, kind = %doc.kind(), path = %path.display(), "wrote rule file");

        self.documents.insert(id.clone(), doc.clone());
        Ok(path)
    }
}
