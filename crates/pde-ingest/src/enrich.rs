//! Enrichment pass over a product table
//!
//! [`Enricher`] fills empty attribute and category cells from the part number
//! and description, stamps every row with a status, and counts what it did.
//! Cells that already hold a value are never touched.

use crate::categorize::Categorizer;
use crate::extract::Extractor;
use crate::rules::RuleConfig;
use chrono::{Local, NaiveDate};
use pde_common::types::{RecordMut, RunStats, Table, ABSENCE_MARKER};
use pde_common::Result;
use tracing::{debug, info, info_span};

pub const PART_NUMBER: &str = "part_number";
pub const DESCRIPTION: &str = "description";
pub const MANUFACTURER: &str = "manufacturer";
pub const CATEGORY: &str = "category";
pub const ENRICHMENT_STATUS: &str = "enrichment_status";

/// Columns every product table carries
pub const REQUIRED_FIELDS: [&str; 3] = [PART_NUMBER, DESCRIPTION, MANUFACTURER];

/// Columns the pass may write, appended when missing
pub const ENRICHMENT_FIELDS: [&str; 7] = [
    "voltage",
    "amperage",
    "horsepower",
    "phase",
    "rpm",
    CATEGORY,
    ENRICHMENT_STATUS,
];

/// Status for rows where nothing was written
pub const STATUS_NOT_ENRICHED: &str = "No enrichment needed";

/// Status for rows where at least one cell was written on `date`
pub fn enriched_status(date: NaiveDate) -> String {
    format!("Enriched on {}", date.format("%Y-%m-%d"))
}

/// Extraction and categorization rules bound together for a run.
///
/// Holds no per-run state, so one instance can enrich any number of tables.
#[derive(Debug, Clone)]
pub struct Enricher {
    extractor: Extractor,
    categorizer: Categorizer,
}

impl Enricher {
    pub fn new(extractor: Extractor, categorizer: Categorizer) -> Self {
        Self {
            extractor,
            categorizer,
        }
    }

    /// Built-in rule sets
    pub fn standard() -> Result<Self> {
        Ok(Self::new(Extractor::standard()?, Categorizer::standard()?))
    }

    pub fn from_rules(rules: &RuleConfig) -> Result<Self> {
        Ok(Self::new(rules.extractor()?, rules.categorizer()?))
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Enrich `table`, stamping enriched rows with today's local date
    pub fn enrich(&self, table: Table) -> (Table, RunStats) {
        self.enrich_on(table, Local::now().date_naive())
    }

    /// Enrich `table`, stamping enriched rows with `date`
    pub fn enrich_on(&self, mut table: Table, date: NaiveDate) -> (Table, RunStats) {
        let span = info_span!("enrich", rows = table.len());
        let _enter = span.enter();

        for field in REQUIRED_FIELDS {
            table.ensure_column(field);
        }

        let mut new_fields_added = 0;
        for field in ENRICHMENT_FIELDS {
            if table.ensure_column(field) {
                debug!(field, "Added enrichment column");
                new_fields_added += 1;
            }
        }

        let status = enriched_status(date);
        let mut enriched_products = 0;

        for (row, mut record) in table.records_mut().enumerate() {
            if self.enrich_record(row, &mut record) {
                record.set(ENRICHMENT_STATUS, status.as_str());
                enriched_products += 1;
            } else {
                record.set(ENRICHMENT_STATUS, STATUS_NOT_ENRICHED);
            }
        }

        let stats = RunStats {
            total_products: table.len(),
            enriched_products,
            new_fields_added,
            errors: Vec::new(),
        };

        info!(
            total = stats.total_products,
            enriched = stats.enriched_products,
            new_fields = stats.new_fields_added,
            "Enrichment pass complete"
        );

        (table, stats)
    }

    /// Returns true if any cell of the row was written
    fn enrich_record(&self, row: usize, record: &mut RecordMut<'_>) -> bool {
        // Only a truly empty cell or the exact marker means "no part number";
        // whitespace-only part numbers are still processed.
        let Some(part_number) = record
            .raw(PART_NUMBER)
            .filter(|pn| !pn.is_empty() && *pn != ABSENCE_MARKER)
            .map(str::to_string)
        else {
            debug!(row, "Skipping row without part number");
            return false;
        };
        let description = record.value(DESCRIPTION).unwrap_or_default().to_string();

        let mut written = false;

        for (attribute, value) in self.extractor.extract(&part_number).iter() {
            if record.fill(attribute, value) {
                debug!(row, attribute, value, "Filled attribute");
                written = true;
            }
        }

        let category = self.categorizer.categorize(&part_number, &description);
        if record.fill(CATEGORY, category) {
            debug!(row, category, "Filled category");
            written = true;
        }

        written
    }
}
