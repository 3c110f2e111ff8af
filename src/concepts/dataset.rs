use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use super::table::ConceptTable;
use crate::engine::GroupKey;

#[derive(Clone, Debug, Deserialize)]
pub struct NodeSeed {
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default = "NodeSeed::default_color")]
    pub color: String,
    /// Shown by the renderer while the node is hovered.
    #[serde(default)]
    pub concept: String,
}

impl NodeSeed {
    fn default_color() -> String {
        "#9AA5B1".to_owned()
    }
}

/// Node set plus the hand-authored concept mapping, as read from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<NodeSeed>,
    #[serde(default)]
    pub concepts: BTreeMap<String, String>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid dataset {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(raw).context("dataset is not valid JSON")?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            bail!("dataset has no nodes");
        }

        let mut labels = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let label = node.label.trim();
            if label.is_empty() {
                bail!("dataset contains a node with an empty label");
            }
            if label.contains(GroupKey::SEPARATOR.trim()) {
                return Err(anyhow!(
                    "node label {label:?} contains the key separator {:?}",
                    GroupKey::SEPARATOR.trim()
                ));
            }
            if !labels.insert(label) {
                bail!("duplicate node label {label:?}");
            }
        }

        for raw_key in self.concepts.keys() {
            let key = GroupKey::parse(raw_key);
            if key.member_count() < 2 {
                bail!("concept key {raw_key:?} must name at least two labels");
            }
            if let Some(unknown) = key.labels().find(|label| !labels.contains(label)) {
                bail!("concept key {raw_key:?} names unknown label {unknown:?}");
            }
        }

        Ok(())
    }

    pub fn concept_table(&self) -> ConceptTable {
        ConceptTable::from_entries(
            self.concepts
                .iter()
                .map(|(key, text)| (key.as_str(), text.as_str())),
        )
    }
}
