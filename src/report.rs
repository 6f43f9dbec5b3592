//! Structured run report for downstream tool consumption.
//!
//! Writes a JSON file next to the PLINK outputs describing the input, the
//! options in effect and the conversion statistics.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ConversionSummary;
use crate::config::ConverterOptions;
use crate::input::InputFormat;
use crate::output::OutputPaths;

/// Complete report of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Tool version
    pub version: String,
    /// Timestamp of run (RFC 3339)
    pub timestamp: String,
    pub input: InputInfo,
    pub outputs: OutputPaths,
    pub options: ConverterOptions,
    /// `[Header]` metadata of an Illumina report
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub report_headers: BTreeMap<String, String>,
    pub statistics: ConversionSummary,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    pub path: String,
    pub format: InputFormat,
}

impl RunReport {
    pub fn new(
        input: &Path,
        format: InputFormat,
        outputs: OutputPaths,
        options: ConverterOptions,
        report_headers: BTreeMap<String, String>,
        statistics: ConversionSummary,
        elapsed_seconds: f64,
    ) -> Self {
        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown"));

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp,
            input: InputInfo {
                path: input.display().to_string(),
                format,
            },
            outputs,
            options,
            report_headers,
            statistics,
            elapsed_seconds,
        }
    }

    /// `<prefix>_report.json`
    pub fn path_for(prefix: &Path) -> PathBuf {
        let mut name = prefix.as_os_str().to_owned();
        name.push("_report.json");
        PathBuf::from(name)
    }

    /// Write the report as pretty JSON beside the outputs of `prefix`.
    pub fn write(&self, prefix: &Path) -> Result<PathBuf> {
        let path = Self::path_for(prefix);
        let json = serde_json::to_string_pretty(self).context("failed to serialize run report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write run report {}", path.display()))?;
        tracing::info!("wrote run report to {}", path.display());
        Ok(path)
    }
}
