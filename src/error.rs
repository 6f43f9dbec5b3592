//! Error taxonomy for the conversion engine.
//!
//! Structural problems in the input are [`FormatError`]s, semantic problems in
//! otherwise well-formed data are [`ValidationError`]s. Both abort a run.
//! Individually malformed wide-format lines are recorded as [`ParseWarning`]s
//! and skipped.

use std::fmt;

use thiserror::Error;

/// Structural problems in an input stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("reached end of input without finding [Header]")]
    MissingHeaderMarker,
    #[error("no data header found in the report")]
    MissingDataHeader,
    #[error("input is empty")]
    EmptyInput,
    #[error(
        "no individual columns found in the header; expected SNP_id<TAB>chr<TAB>position<TAB>Ind1<TAB>Ind2..."
    )]
    NoSampleColumns,
    #[error("line {line}: expected {expected} genotypes, got {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: expected {expected} fields, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("missing required columns: {missing:?}; available: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Semantic problems in well-formed genotype data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "SNP '{variant}' (line {variant_number}) has more than 2 alleles: {alleles:?}; expected biallelic"
    )]
    NotBiallelic {
        variant: String,
        /// 1-based position of the variant in variant order.
        variant_number: usize,
        /// Distinct allele characters, sorted.
        alleles: Vec<char>,
    },
    #[error("unexpected genotype '{genotype}' for SNP '{variant}', sample '{sample}'")]
    GenotypeLength {
        variant: String,
        sample: String,
        genotype: String,
    },
}

/// Any error the engine can return.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// A skipped input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Fewer than the four fields a wide-format data line needs.
    TooFewFields { found: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::TooFewFields { found } => write!(
                f,
                "skipped malformed line {}: expected at least 4 fields, found {}",
                self.line, found
            ),
        }
    }
}
