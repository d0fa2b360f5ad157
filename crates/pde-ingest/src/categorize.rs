//! Keyword-based product categorization

use pde_common::{PdeError, Result};

/// Label returned when no rule matches
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Built-in categories in precedence order
pub const STANDARD_CATEGORIES: &[(&str, &[&str])] = &[
    ("Motor", &["MOTOR", "MOT", "HP"]),
    ("Valve", &["VALVE", "VLV", "BALL", "GATE"]),
    ("Pump", &["PUMP", "PMP"]),
    ("Bearing", &["BEARING", "BRG"]),
    ("Belt", &["BELT", "BLT"]),
    ("Sensor", &["SENSOR", "SNS", "TEMP", "PRESSURE"]),
    ("Switch", &["SWITCH", "SW"]),
    ("Relay", &["RELAY", "RLY"]),
    ("Connector", &["CONNECTOR", "CONN", "PLUG"]),
    ("Filter", &["FILTER", "FLT"]),
];

/// A category label and the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    label: String,
    keywords: Vec<String>,
}

impl CategoryRule {
    /// Keywords are stored upper-cased; blank keywords are rejected since they
    /// would match every product.
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = label.into();
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_uppercase())
            .collect::<Vec<_>>();

        if label.trim().is_empty() {
            return Err(PdeError::Config("Category label cannot be empty".to_string()));
        }
        if keywords.is_empty() || keywords.iter().any(String::is_empty) {
            return Err(PdeError::Config(format!(
                "Category '{}' needs at least one non-empty keyword",
                label
            )));
        }

        Ok(Self { label, keywords })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Substring match: "MOT" matches inside "REMOTE"
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// First-match classifier over an ordered rule list
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Result<Self> {
        let rules = STANDARD_CATEGORIES
            .iter()
            .map(|(label, keywords)| CategoryRule::new(*label, keywords.iter()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Returns the first rule label whose keywords occur in the combined
    /// part number and description, or [`UNCATEGORIZED`].
    pub fn categorize(&self, part_number: &str, description: &str) -> &str {
        let text = format!("{} {}", part_number, description).to_uppercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&text))
            .map_or(UNCATEGORIZED, |rule| rule.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::standard().unwrap()
    }

    #[test]
    fn test_standard_order() {
        let cat = categorizer();
        let labels: Vec<&str> = cat.rules().iter().map(CategoryRule::label).collect();
        assert_eq!(
            labels,
            vec![
                "Motor", "Valve", "Pump", "Bearing", "Belt", "Sensor", "Switch", "Relay",
                "Connector", "Filter"
            ]
        );
    }

    #[test]
    fn test_earlier_category_wins() {
        assert_eq!(categorizer().categorize("X-100", "motor operated valve"), "Motor");
        assert_eq!(categorizer().categorize("VALVE MOTOR", ""), "Motor");
    }

    #[test]
    fn test_part_number_alone_can_categorize() {
        assert_eq!(categorizer().categorize("PMP-200", ""), "Pump");
        assert_eq!(categorizer().categorize("BRG-6204", "deep groove"), "Bearing");
    }

    #[test]
    fn test_substring_matching() {
        // "SW" hides inside "SWIVEL"
        assert_eq!(categorizer().categorize("A-1", "swivel mount"), "Switch");
        // "HP" in a rating string selects Motor
        assert_eq!(categorizer().categorize("GEN-2HP", ""), "Motor");
    }

    #[test]
    fn test_uncategorized() {
        assert_eq!(categorizer().categorize("XYZ-123", "widget"), UNCATEGORIZED);
        assert_eq!(categorizer().categorize("", ""), UNCATEGORIZED);
    }

    #[test]
    fn test_keywords_are_upper_cased() {
        let rule = CategoryRule::new("Hose", ["hose", " tube "]).unwrap();
        assert_eq!(rule.keywords(), ["HOSE", "TUBE"]);
        let cat = Categorizer::new(vec![rule]);
        assert_eq!(cat.categorize("H-1", "rubber tube"), "Hose");
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(CategoryRule::new("Any", [""]).is_err());
        assert!(CategoryRule::new("None", Vec::<String>::new()).is_err());
        assert!(CategoryRule::new(" ", ["X"]).is_err());
    }

    #[test]
    fn test_idempotent() {
        let cat = categorizer();
        let first = cat.categorize("RLY-24", "relay").to_string();
        assert_eq!(cat.categorize("RLY-24", "relay"), first);
    }
}
