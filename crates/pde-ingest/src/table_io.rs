//! Reading and writing product tables as delimited text or Excel workbooks

use crate::config::IngestConfig;
use calamine::{DataType, Reader as _};
use pde_common::types::Table;
use pde_common::{PdeError, Result};
use rust_xlsxwriter::Workbook;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk layout of a product table, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Delimited(u8),
    Xlsx,
    Xls,
}

/// Lower-cased extension of `path`, if any
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn format_of(path: &Path) -> TableFormat {
    match extension(path).as_deref() {
        Some("xlsx") | Some("xlsm") => TableFormat::Xlsx,
        Some("xls") => TableFormat::Xls,
        Some("tsv") | Some("tab") => TableFormat::Delimited(b'\t'),
        _ => TableFormat::Delimited(b','),
    }
}

fn spreadsheet_error<E: Display>(err: E) -> PdeError {
    PdeError::Spreadsheet(err.to_string())
}

/// Rejects files with a disallowed extension or over the size limit.
///
/// Runs before any parsing so oversized uploads are never read into memory.
pub fn check_input(path: &Path, config: &IngestConfig) -> Result<()> {
    let ext = extension(path).unwrap_or_default();
    if !config.allowed_extensions.iter().any(|allowed| *allowed == ext) {
        return Err(PdeError::UnsupportedFileType(format!(
            "{} (allowed: {})",
            path.display(),
            config.allowed_extensions.join(", ")
        )));
    }

    let size = std::fs::metadata(path)?.len();
    if size > config.max_input_bytes {
        return Err(PdeError::InputTooLarge {
            size,
            limit: config.max_input_bytes,
        });
    }

    debug!(path = %path.display(), size, "Input accepted");
    Ok(())
}

/// Loads a CSV, TSV, XLSX or XLS file; the header row becomes the schema.
///
/// Short rows are padded with empty cells. A row holding a non-empty cell past
/// the last header column is rejected with [`PdeError::MalformedInput`], row
/// numbers counting data rows from 1.
pub fn read_table(path: &Path) -> Result<Table> {
    let table = match format_of(path) {
        TableFormat::Delimited(delimiter) => read_delimited(path, delimiter)?,
        TableFormat::Xlsx | TableFormat::Xls => read_workbook(path)?,
    };

    info!(path = %path.display(), rows = table.len(), columns = table.columns().len(), "Loaded table");
    Ok(table)
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    let mut table = Table::new(columns);

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        push_checked(&mut table, idx + 1, record.iter().map(str::to_string).collect())?;
    }

    Ok(table)
}

/// First worksheet only; other sheets are ignored.
fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = calamine::open_workbook_auto(path).map_err(spreadsheet_error)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(spreadsheet_error)?,
        None => return Ok(Table::default()),
    };

    let mut rows = range.rows();
    let mut columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| cell_text(c).trim().to_string()).collect())
        .unwrap_or_default();
    // The used range is rectangular, so unnamed trailing header cells are padding
    while columns.last().is_some_and(String::is_empty) {
        columns.pop();
    }

    let mut table = Table::new(columns);
    for (idx, row) in rows.enumerate() {
        push_checked(&mut table, idx + 1, row.iter().map(cell_text).collect())?;
    }

    Ok(table)
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) | DataType::DateTimeIso(s) | DataType::DurationIso(s) => s.clone(),
        DataType::Float(v) | DataType::DateTime(v) | DataType::Duration(v) => v.to_string(),
        DataType::Int(v) => v.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::Error(e) => format!("#{e:?}"),
    }
}

fn push_checked(table: &mut Table, row: usize, mut cells: Vec<String>) -> Result<()> {
    let width = table.columns().len();
    if cells.len() > width {
        if let Some(extra) = cells[width..].iter().position(|c| !c.trim().is_empty()) {
            return Err(PdeError::MalformedInput {
                row,
                message: format!(
                    "value in column {} but the header has {} columns",
                    width + extra + 1,
                    width
                ),
            });
        }
        cells.truncate(width);
    }

    table.push_row(cells);
    Ok(())
}

/// Writes `table` in the format implied by the extension of `path`.
///
/// Legacy `.xls` cannot be written; [`output_path`] maps it to `.xlsx`.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    match format_of(path) {
        TableFormat::Delimited(delimiter) => write_delimited(table, path, delimiter)?,
        TableFormat::Xlsx => write_workbook(table, path)?,
        TableFormat::Xls => {
            return Err(PdeError::UnsupportedFileType(format!(
                "{} (.xls output is not supported, use .xlsx)",
                path.display()
            )))
        },
    }

    info!(path = %path.display(), rows = table.len(), "Wrote table");
    Ok(())
}

fn write_delimited(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_workbook(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        sheet
            .write_string(0, column_number(col)?, name.as_str())
            .map_err(spreadsheet_error)?;
    }

    for (idx, row) in table.rows().enumerate() {
        let row_number = u32::try_from(idx + 1).map_err(spreadsheet_error)?;
        for (col, cell) in row.iter().enumerate() {
            // Empty cells stay blank
            if cell.is_empty() {
                continue;
            }
            sheet
                .write_string(row_number, column_number(col)?, cell.as_str())
                .map_err(spreadsheet_error)?;
        }
    }

    workbook.save(path).map_err(spreadsheet_error)
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(spreadsheet_error)
}

/// Reduces a user-supplied file name to a safe single path component.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    let trimmed = cleaned.trim_start_matches(['.', '_']);
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<dir of input>/<prefix><sanitized input name>`
///
/// A `.xls` input gets a `.xlsx` output, the only workbook format written.
pub fn output_path(input: &Path, prefix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let mut file_name = PathBuf::from(format!("{}{}", prefix, sanitize_filename(&name)));
    if format_of(&file_name) == TableFormat::Xls {
        file_name.set_extension("xlsx");
    }

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => file_name,
    }
}
