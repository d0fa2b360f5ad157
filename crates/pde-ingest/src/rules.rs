//! Rule file loading
//!
//! Rule sets are plain data so they can be reviewed and versioned apart from
//! the code. A rule file is JSON; either list may be omitted to keep the
//! built-in one:
//!
//! ```json
//! {
//!   "attributes": [{ "name": "voltage", "pattern": "(\\d+)V" }],
//!   "categories": [{ "label": "Motor", "keywords": ["MOTOR", "MOT", "HP"] }]
//! }
//! ```

use crate::categorize::{CategoryRule, Categorizer, STANDARD_CATEGORIES};
use crate::extract::{ExtractionRule, Extractor, STANDARD_RULES};
use pde_common::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One attribute pattern as written in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRuleSpec {
    pub name: String,
    pub pattern: String,
}

/// One category as written in a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRuleSpec {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Serializable form of both rule sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default = "standard_attributes")]
    pub attributes: Vec<AttributeRuleSpec>,

    #[serde(default = "standard_categories")]
    pub categories: Vec<CategoryRuleSpec>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            attributes: standard_attributes(),
            categories: standard_categories(),
        }
    }
}

fn standard_attributes() -> Vec<AttributeRuleSpec> {
    STANDARD_RULES
        .iter()
        .map(|(name, pattern)| AttributeRuleSpec {
            name: name.to_string(),
            pattern: pattern.to_string(),
        })
        .collect()
}

fn standard_categories() -> Vec<CategoryRuleSpec> {
    STANDARD_CATEGORIES
        .iter()
        .map(|(label, keywords)| CategoryRuleSpec {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

impl RuleConfig {
    /// Read a JSON rule file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: RuleConfig = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            attributes = config.attributes.len(),
            categories = config.categories.len(),
            "Loaded rule file"
        );
        Ok(config)
    }

    /// The rule file at `path`, or the built-in rules when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn extractor(&self) -> Result<Extractor> {
        let rules = self
            .attributes
            .iter()
            .map(|a| ExtractionRule::new(a.name.clone(), &a.pattern))
            .collect::<Result<Vec<_>>>()?;
        Extractor::new(rules)
    }

    pub fn categorizer(&self) -> Result<Categorizer> {
        let rules = self
            .categories
            .iter()
            .map(|c| CategoryRule::new(c.label.clone(), &c.keywords))
            .collect::<Result<Vec<_>>>()?;
        Ok(Categorizer::new(rules))
    }
}
