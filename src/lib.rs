#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod conversion;
pub mod error;
pub mod illumina;
pub mod index;
pub mod input;
pub mod matrix;
pub mod normalize;
pub mod output;
pub mod ped;
pub mod qc;
pub mod report;
pub mod smart_reader;
pub mod table;
pub mod wide;

pub use config::{ColumnMap, ConverterOptions, Sex};
pub use conversion::{Conversion, ConversionConfig, Converter, FileConversion, convert_file};
pub use error::{ConvertError, FormatError, ParseWarning, ValidationError};
pub use input::InputFormat;
pub use ped::PedOutput;

use serde::Serialize;

use crate::matrix::FillStats;

/// Counters describing one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// Genotype rows after melting/normalization.
    pub input_rows: usize,
    pub variants: usize,
    pub samples: usize,
    /// Wide-format lines skipped for having too few fields.
    pub skipped_lines: usize,
    /// Calls set to missing by the low-count filter.
    pub filtered_genotypes: usize,
    /// Missing calls, including filtered ones.
    pub missing_calls: usize,
    /// Sample/SNP pairs with no row in the input.
    pub uncalled_cells: usize,
    /// Repeated calls for one sample and SNP that a later row replaced.
    pub overwritten_calls: usize,
}

impl ConversionSummary {
    pub fn record_fill(&mut self, stats: &FillStats) {
        self.filtered_genotypes += stats.filtered_genotypes;
        self.missing_calls += stats.missing_calls;
        self.uncalled_cells += stats.uncalled_cells;
        self.overwritten_calls += stats.overwritten_calls;
    }
}
