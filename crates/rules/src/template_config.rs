//! NarrativeTemplates rule kind: title/body text for every
//! (category, timeframe) pair.
//!
//! Text is minijinja source. Available variables: `matches`, `others`,
//! `total`, `milestone`, `period`. A document may override any subset of the
//! table; entries it leaves out keep the built-in text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rarity_core::{NarrativeCategory, Timeframe};

use crate::schema::CommonMetadata;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level NarrativeTemplates rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeTemplatesRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: NarrativeTemplatesSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeTemplatesSpec {
    pub templates: BTreeMap<NarrativeCategory, BTreeMap<Timeframe, TemplatePair>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TemplatePair {
    pub title: String,
    pub body: String,
}

impl NarrativeTemplatesSpec {
    /// Iterate every entry present in the document.
    pub fn entries(&self) -> impl Iterator<Item = (NarrativeCategory, Timeframe, &TemplatePair)> + '_ {
        self.templates
            .iter()
            .flat_map(|(c, row)| row.iter().map(move |(t, pair)| (*c, *t, pair)))
    }
}

// ── Built-in text ───────────────────────────────────────────────────

type Row = [(&'static str, &'static str); 4];

// Rows follow NarrativeCategory::ALL, columns follow Timeframe::ALL.
const DEFAULT_TEMPLATES: [Row; 6] = [
    // pioneer
    [
        ("Trailblazer of the Week", "Nobody else did it {{ period }}. You're setting the pace."),
        ("Pioneer of the Month", "You're the only one {{ period }}. First in line."),
        ("Pioneer of the Year", "Nobody else did it {{ period }}. You're charting new ground."),
        ("True Original", "You're the first ever to do this. A genuine pioneer."),
    ],
    // milestone
    [
        ("Weekly Milestone", "{{ milestone }} people did it {{ period }}. You helped hit the mark."),
        ("Monthly Milestone", "This just reached {{ milestone }} people {{ period }}. You're part of the count."),
        ("Milestone Year", "{{ milestone }} people {{ period }}, and you're one of them."),
        ("All-Time Milestone", "{{ milestone }} people have now done this. You're part of history."),
    ],
    // growth
    [
        ("Catching On", "{{ matches }} people did it {{ period }}, and the number keeps climbing."),
        ("Rising Trend", "{{ matches }} people {{ period }}, well ahead of the weekly pace."),
        ("Breakout Year", "{{ matches }} people {{ period }}. This is taking off."),
        ("Growing Movement", "{{ matches }} people so far, and still growing."),
    ],
    // community
    [
        ("Part of the Crowd", "You and {{ others }} others did it {{ period }}."),
        ("Community Favorite", "You're one of {{ matches }} people who did it {{ period }}."),
        ("Shared Experience", "{{ others }} others joined you {{ period }}."),
        ("Popular Choice", "{{ matches }} people have done this. You're in good company."),
    ],
    // rare
    [
        ("Rare Find", "Only {{ others }} other{{ 's' if others != 1 }} did it {{ period }}."),
        ("Select Few", "Just {{ matches }} people did it {{ period }}. You're one of them."),
        ("Rare Company", "Only {{ others }} other{{ 's' if others != 1 }} shared it {{ period }}."),
        ("Hidden Gem", "Only {{ matches }} people have ever done this."),
    ],
    // stable
    [
        ("Steady Pace", "{{ matches }} people did it {{ period }}. Right on rhythm."),
        ("Holding Steady", "{{ matches }} people {{ period }}, in line with the usual pace."),
        ("Consistent Year", "{{ matches }} people {{ period }}. A steady favorite."),
        ("Established Classic", "{{ matches }} people have done this over time."),
    ],
];

fn builtin_pair(category: NarrativeCategory, timeframe: Timeframe) -> TemplatePair {
    let (title, body) = DEFAULT_TEMPLATES[category as usize][timeframe as usize];
    TemplatePair {
        title: title.to_string(),
        body: body.to_string(),
    }
}

impl Default for NarrativeTemplatesSpec {
    fn default() -> Self {
        let templates = NarrativeCategory::ALL
            .into_iter()
            .map(|c| {
                let row = Timeframe::ALL
                    .into_iter()
                    .map(|t| (t, builtin_pair(c, t)))
                    .collect();
                (c, row)
            })
            .collect();
        Self { templates }
    }
}

impl Default for NarrativeTemplatesRule {
    fn default() -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "NarrativeTemplates".to_string(),
            metadata: CommonMetadata::builtin("templates-default", "Default narrative text"),
            spec: NarrativeTemplatesSpec::default(),
        }
    }
}

// ── Compiled (hot-path) type ────────────────────────────────────────

/// Complete, immutable `(category, timeframe) → text` table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplates {
    table: [[TemplatePair; 4]; 6],
}

impl CompiledTemplates {
    pub fn get(&self, category: NarrativeCategory, timeframe: Timeframe) -> &TemplatePair {
        &self.table[category as usize][timeframe as usize]
    }
}

impl Default for CompiledTemplates {
    fn default() -> Self {
        Self {
            table: NarrativeCategory::ALL.map(|c| Timeframe::ALL.map(|t| builtin_pair(c, t))),
        }
    }
}

impl NarrativeTemplatesRule {
    /// Overlay this document's entries onto the built-in table.
    pub fn compile(&self) -> CompiledTemplates {
        let mut compiled = CompiledTemplates::default();
        for (category, timeframe, pair) in self.spec.entries() {
            compiled.table[category as usize][timeframe as usize] = pair.clone();
        }
        compiled
    }
}
