//! File-to-file enrichment: check, read, enrich, write, report

use crate::config::IngestConfig;
use crate::enrich::Enricher;
use crate::report::EnrichmentReport;
use crate::table_io::{check_input, output_path, read_table, write_table};
use pde_common::Result;
use std::path::Path;
use tracing::info;

/// Enrich the table at `input` and write the result.
///
/// The output goes to `output` when given, otherwise next to the input under
/// the configured prefix. The input file is never modified.
pub fn enrich_file(
    input: &Path,
    output: Option<&Path>,
    enricher: &Enricher,
    config: &IngestConfig,
) -> Result<EnrichmentReport> {
    check_input(input, config)?;

    let table = read_table(input)?;
    let (table, stats) = enricher.enrich(table);

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => output_path(input, &config.output_prefix),
    };
    write_table(&table, &output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        enriched = stats.enriched_products,
        "Enriched file"
    );

    Ok(EnrichmentReport::new(
        &table,
        stats,
        Some(output),
        config.preview_rows,
    ))
}
