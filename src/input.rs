use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::Serialize;

use crate::config::ConverterOptions;
use crate::error::{FormatError, ParseWarning};
use crate::table::RawTable;
use crate::{illumina, wide};

/// Number of non-blank lines inspected when detecting the layout.
const DETECT_LINES: usize = 64;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Illumina GenomeStudio Final Report ([Header]/[Data] sections)
    Illumina,
    /// SNP-major table: SNP, chromosome, position, then one column per individual
    Wide,
    /// Detect format automatically
    Auto,
}

impl InputFormat {
    /// Illumina when a `[Header]` marker opens one of the first lines,
    /// wide otherwise.
    pub fn detect(text: &str) -> Self {
        let is_report = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(DETECT_LINES)
            .any(|line| line.starts_with("[Header]"));
        let format = if is_report { Self::Illumina } else { Self::Wide };
        tracing::debug!(?format, "detected input format");
        format
    }

    /// Replace `Auto` with the detected layout of `text`.
    pub fn resolve(self, text: &str) -> Self {
        match self {
            Self::Auto => Self::detect(text),
            explicit => explicit,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Illumina => "illumina",
            Self::Wide => "wide",
            Self::Auto => "auto",
        }
    }
}

/// Raw rows from either layout, plus what the parser learned on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// The resolved layout; never `Auto`.
    pub format: InputFormat,
    pub table: RawTable,
    /// `[Header]` metadata of an Illumina report; empty for wide tables.
    pub report_headers: BTreeMap<String, String>,
    pub warnings: Vec<ParseWarning>,
}

/// Parse `text` with the parser selected by `format`.
pub fn parse_input(
    text: &str,
    format: InputFormat,
    options: &ConverterOptions,
) -> Result<ParsedInput, FormatError> {
    match format.resolve(text) {
        InputFormat::Illumina => {
            let report = illumina::parse_report(text)?;
            Ok(ParsedInput {
                format: InputFormat::Illumina,
                table: report.table,
                report_headers: report.headers,
                warnings: Vec::new(),
            })
        }
        InputFormat::Wide | InputFormat::Auto => {
            let wide = wide::parse_wide(text, &options.column_map, &options.missing_genotype)?;
            Ok(ParsedInput {
                format: InputFormat::Wide,
                table: wide.table,
                report_headers: BTreeMap::new(),
                warnings: wide.warnings,
            })
        }
    }
}
