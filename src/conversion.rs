use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::ConversionSummary;
use crate::config::ConverterOptions;
use crate::error::ConvertError;
use crate::index::GenotypeIndex;
use crate::input::{InputFormat, ParsedInput, parse_input};
use crate::matrix::build_matrix;
use crate::normalize::normalize;
use crate::output::{OutputPaths, write_plink_text};
use crate::ped::{PedOutput, assemble};
use crate::report::RunReport;
use crate::smart_reader;
use crate::table::RawTable;

/// Converts parsed genotype tables to PLINK MAP/PED lines.
///
/// Holds only configuration, so one converter can be reused for any number
/// of inputs.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConverterOptions,
}

/// In-memory result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub output: PedOutput,
    pub summary: ConversionSummary,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Result<Self, ConvertError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn parse(&self, text: &str, format: InputFormat) -> Result<ParsedInput, ConvertError> {
        Ok(parse_input(text, format, &self.options)?)
    }

    /// Normalize, index, quality-control and render one table.
    pub fn convert(&self, table: &RawTable) -> Result<Conversion, ConvertError> {
        let rows = normalize(table, &self.options.column_map)?;
        let index = GenotypeIndex::build(&rows);
        tracing::info!(
            "found {} SNPs, {} individuals",
            index.variants().len(),
            index.samples().len()
        );

        let (matrix, stats) = build_matrix(
            &rows,
            &index,
            &self.options.missing_genotype,
            self.options.min_genotype_count,
        )?;
        let output = assemble(&index, &matrix, self.options.sex, self.options.phenotype);

        let mut summary = ConversionSummary {
            input_rows: rows.len(),
            variants: index.variants().len(),
            samples: index.samples().len(),
            ..ConversionSummary::default()
        };
        summary.record_fill(&stats);

        Ok(Conversion { output, summary })
    }

    /// Parse and convert `text` in one step.
    pub fn convert_text(&self, text: &str, format: InputFormat) -> Result<Conversion, ConvertError> {
        let parsed = self.parse(text, format)?;
        let mut conversion = self.convert(&parsed.table)?;
        conversion.summary.skipped_lines = parsed.warnings.len();
        Ok(conversion)
    }
}

/// Configuration required to drive a file conversion.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input: PathBuf,
    pub input_format: InputFormat,
    /// Outputs are `<prefix>.map`, `<prefix>.ped` and `<prefix>_id.txt`.
    pub output_prefix: PathBuf,
    pub options: ConverterOptions,
    /// Also write `<prefix>_report.json`.
    pub write_report: bool,
}

/// What a file conversion wrote.
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub format: InputFormat,
    pub paths: OutputPaths,
    pub report: Option<PathBuf>,
    pub summary: ConversionSummary,
}

/// Read a genotype file and write PLINK MAP/PED and sample-id files.
pub fn convert_file(config: ConversionConfig) -> Result<FileConversion> {
    let start = Instant::now();
    tracing::info!(
        input = %config.input.display(),
        input_format = config.input_format.name(),
        output = %config.output_prefix.display(),
        min_genotype_count = config.options.min_genotype_count,
        "starting conversion",
    );

    let converter = Converter::new(config.options.clone())?;
    let text = smart_reader::read_to_string(&config.input)?;
    let parsed = converter
        .parse(&text, config.input_format)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    drop(text);

    let mut conversion = converter
        .convert(&parsed.table)
        .with_context(|| format!("failed to convert {}", config.input.display()))?;
    conversion.summary.skipped_lines = parsed.warnings.len();

    let paths = write_plink_text(&config.output_prefix, &conversion.output)?;
    let elapsed = start.elapsed().as_secs_f64();

    let report = if config.write_report {
        let report = RunReport::new(
            &config.input,
            parsed.format,
            paths.clone(),
            config.options,
            parsed.report_headers,
            conversion.summary.clone(),
            elapsed,
        );
        Some(report.write(&config.output_prefix)?)
    } else {
        None
    };

    tracing::info!("conversion completed in {:.2} seconds", elapsed);
    tracing::info!("  MAP : {}  ({} SNPs)", paths.map.display(), conversion.output.map.len());
    tracing::info!(
        "  PED : {}  ({} individuals)",
        paths.ped.display(),
        conversion.output.ped.len()
    );
    tracing::info!("  IDs : {}", paths.ids.display());

    Ok(FileConversion {
        format: parsed.format,
        paths,
        report,
        summary: conversion.summary,
    })
}
