//! Attribute extraction from part numbers
//!
//! Manufacturers encode ratings directly in part numbers (`MOT-5HP-3PH-1750RPM`,
//! `CB-480V-30A`). Each [`ExtractionRule`] pulls one rating out of the
//! upper-cased part number; an [`Extractor`] applies its rules in order.

use pde_common::{PdeError, Result};
use regex::Regex;
use tracing::trace;

/// Built-in rules as `(attribute, pattern)`, in output order.
///
/// Capture group 1 is the extracted value. `regex` has no look-ahead, so the
/// amperage rule consumes the following non-word character (or end of input)
/// instead of asserting it.
pub const STANDARD_RULES: &[(&str, &str)] = &[
    ("voltage", r"(\d+)V"),
    ("amperage", r"(\d+)A(?:\W|$)"),
    ("horsepower", r"(\d+(?:\.\d+)?)HP"),
    ("phase", r"(\d)PH"),
    ("rpm", r"(\d+)RPM"),
];

/// A named pattern yielding at most one value per part number
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    name: String,
    pattern: Regex,
}

impl ExtractionRule {
    /// Compiles `pattern` for attribute `name`.
    ///
    /// The pattern must contain at least one capture group.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let compiled = Regex::new(pattern).map_err(|e| PdeError::InvalidPattern {
            name: name.clone(),
            reason: e.to_string(),
        })?;

        if compiled.captures_len() < 2 {
            return Err(PdeError::InvalidPattern {
                name,
                reason: "pattern has no capture group".to_string(),
            });
        }

        Ok(Self {
            name,
            pattern: compiled,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Leftmost match against already upper-cased text
    fn apply(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Ordered attribute → value pairs produced by one extraction.
///
/// Attributes whose rule did not match are absent, never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specs(Vec<(String, String)>);

impl Specs {
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Applies an ordered, immutable set of extraction rules
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<ExtractionRule>,
}

impl Extractor {
    /// Builds an extractor from rules in output order.
    ///
    /// Attribute names must be unique.
    pub fn new(rules: Vec<ExtractionRule>) -> Result<Self> {
        for (idx, rule) in rules.iter().enumerate() {
            if rules[..idx].iter().any(|r| r.name == rule.name) {
                return Err(PdeError::Config(format!(
                    "Duplicate extraction rule for '{}'",
                    rule.name
                )));
            }
        }
        Ok(Self { rules })
    }

    /// Voltage, amperage, horsepower, phase, and RPM rules
    pub fn standard() -> Result<Self> {
        let rules = STANDARD_RULES
            .iter()
            .map(|(name, pattern)| ExtractionRule::new(*name, pattern))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rules)
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Extracts every attribute whose rule matches `part_number`.
    ///
    /// Rules are independent: a token may satisfy more than one of them.
    pub fn extract(&self, part_number: &str) -> Specs {
        if part_number.trim().is_empty() {
            return Specs::default();
        }

        let text = part_number.to_uppercase();
        let found = self
            .rules
            .iter()
            .filter_map(|rule| rule.apply(&text).map(|v| (rule.name.clone(), v)))
            .collect::<Vec<_>>();

        trace!(part_number, matched = found.len(), "Extracted attributes");
        Specs(found)
    }
}
