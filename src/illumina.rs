//! Reader for Illumina GenomeStudio Final Report exports.
//!
//! A report starts with a `[Header]` section of `key<TAB>value` lines, followed
//! by a bracketed `[Data]` marker, one line of column names and then one
//! tab-delimited row per SNP and sample.

use std::collections::BTreeMap;

use crate::error::FormatError;
use crate::table::{RawTable, split_fields};

const HEADER_MARKER: &str = "[Header]";

/// A parsed Final Report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Key/value metadata from the `[Header]` section.
    pub headers: BTreeMap<String, String>,
    /// Data rows named by the report's column line.
    pub table: RawTable,
}

/// Parse a complete Final Report held in memory.
pub fn parse_report(text: &str) -> Result<Report, FormatError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    loop {
        match lines.next() {
            None => return Err(FormatError::MissingHeaderMarker),
            Some((_, line)) if line.starts_with(HEADER_MARKER) => break,
            Some(_) => {}
        }
    }

    let mut headers = BTreeMap::new();
    for (_, line) in lines.by_ref() {
        if line.starts_with('[') {
            break;
        }
        let mut fields = line.trim().split('\t');
        if let (Some(key), Some(value)) = (fields.next(), fields.next()) {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let columns = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => split_fields(line.trim()),
        _ => return Err(FormatError::MissingDataHeader),
    };

    let mut table = RawTable::new(columns);
    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        table.push_row(number, split_fields(line))?;
    }

    tracing::info!(
        rows = table.len(),
        columns = table.columns().len(),
        "read Illumina report"
    );

    Ok(Report { headers, table })
}
