//! Run reports handed back to callers

use pde_common::types::{RunStats, Table};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one enrichment run: counters, output location, and a preview
/// of the first enriched rows in table order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub success: bool,
    pub stats: RunStats,
    pub output_path: Option<PathBuf>,
    pub preview: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl EnrichmentReport {
    pub fn new(
        table: &Table,
        stats: RunStats,
        output_path: Option<PathBuf>,
        preview_rows: usize,
    ) -> Self {
        let preview = table
            .records()
            .take(preview_rows)
            .map(|r| r.to_json())
            .collect();

        Self {
            success: stats.errors.is_empty(),
            stats,
            output_path,
            preview,
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Enriched {} of {} products ({} new fields)",
            self.stats.enriched_products, self.stats.total_products, self.stats.new_fields_added
        );
        if let Some(ref path) = self.output_path {
            line.push_str(&format!(" -> {}", path.display()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> Table {
        let mut table = Table::new(vec!["part_number".to_string(), "category".to_string()]);
        for i in 0..rows {
            table.push_row(vec![format!("P-{}", i), "Pump".to_string()]);
        }
        table
    }

    fn stats(total: usize) -> RunStats {
        RunStats {
            total_products: total,
            enriched_products: 2,
            new_fields_added: 5,
            errors: vec![],
        }
    }

    #[test]
    fn test_preview_is_truncated_in_order() {
        let report = EnrichmentReport::new(&table(12), stats(12), None, 10);
        assert_eq!(report.preview.len(), 10);
        assert_eq!(report.preview[0]["part_number"], "P-0");
        assert_eq!(report.preview[9]["part_number"], "P-9");
        assert!(report.success);
    }

    #[test]
    fn test_preview_shorter_than_limit() {
        let report = EnrichmentReport::new(&table(3), stats(3), None, 10);
        assert_eq!(report.preview.len(), 3);
    }

    #[test]
    fn test_json_shape() {
        let report =
            EnrichmentReport::new(&table(1), stats(1), Some(PathBuf::from("out.csv")), 10);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["total_products"], 1);
        assert_eq!(json["output_path"], "out.csv");
        assert_eq!(json["preview"][0]["category"], "Pump");
    }

    #[test]
    fn test_summary() {
        let report =
            EnrichmentReport::new(&table(4), stats(4), Some(PathBuf::from("out.csv")), 10);
        assert_eq!(report.summary(), "Enriched 2 of 4 products (5 new fields) -> out.csv");
    }
}
