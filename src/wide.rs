//! Reader for SNP-major genotype tables.
//!
//! ```text
//! SNP_id  chr  position  Ind1  Ind2  ...
//! rs123   1    12345     AA    AG    ...
//! ```
//!
//! The table is melted into one row per SNP and individual, using the same
//! column names an Illumina report would carry, so both layouts share the
//! downstream pipeline.

use crate::config::ColumnMap;
use crate::error::{FormatError, ParseWarning, WarningKind};
use crate::table::RawTable;

/// Fixed leading columns: SNP id, chromosome, position.
const LEADING_COLUMNS: usize = 3;

/// A melted wide table plus the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub table: RawTable,
    pub warnings: Vec<ParseWarning>,
}

/// Parse a complete wide-format table held in memory.
///
/// A genotype cell that is not exactly two characters becomes a pair of
/// `missing_genotype` alleles. A line with fewer than four fields is skipped
/// with a warning; any other genotype count mismatch is fatal.
pub fn parse_wide(
    text: &str,
    columns: &ColumnMap,
    missing_genotype: &str,
) -> Result<WideTable, FormatError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(FormatError::EmptyInput)?;
    let header: Vec<&str> = header.trim_end_matches('\r').split('\t').collect();
    let individuals = header.get(LEADING_COLUMNS..).unwrap_or_default();
    if individuals.is_empty() {
        return Err(FormatError::NoSampleColumns);
    }

    let mut table = RawTable::new(Vec::from(columns.required().map(str::to_string)));
    let mut warnings = Vec::new();

    for (number, line) in lines.enumerate().map(|(i, line)| (i + 2, line)) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < LEADING_COLUMNS + 1 {
            let warning = ParseWarning {
                line: number,
                kind: WarningKind::TooFewFields { found: parts.len() },
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            continue;
        }

        let (snp, chromosome, position) = (parts[0], parts[1], parts[2]);
        let genotypes = &parts[LEADING_COLUMNS..];
        if genotypes.len() != individuals.len() {
            return Err(FormatError::ColumnCount {
                line: number,
                expected: individuals.len(),
                found: genotypes.len(),
            });
        }

        for (individual, genotype) in individuals.iter().zip(genotypes) {
            let (allele1, allele2) = split_genotype(genotype, missing_genotype);
            table.push_row(
                number,
                vec![
                    snp.to_string(),
                    individual.to_string(),
                    allele1,
                    allele2,
                    chromosome.to_string(),
                    position.to_string(),
                ],
            )?;
        }
    }

    tracing::info!(
        rows = table.len(),
        individuals = individuals.len(),
        skipped = warnings.len(),
        "read wide-format table"
    );

    Ok(WideTable { table, warnings })
}

fn split_genotype(genotype: &str, missing_genotype: &str) -> (String, String) {
    let mut chars = genotype.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => (a.to_string(), b.to_string()),
        _ => (missing_genotype.to_string(), missing_genotype.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<WideTable, FormatError> {
        parse_wide(text, &ColumnMap::default(), "N")
    }

    #[test]
    fn melts_into_one_row_per_cell() {
        let wide = parse("SNP\tchr\tpos\tInd1\tInd2\nrs1\t1\t100\tAG\tGG\n").unwrap();
        assert_eq!(wide.table.columns()[0], "SNP Name");
        assert_eq!(wide.table.len(), 2);
        assert_eq!(wide.table.rows()[0], vec!["rs1", "Ind1", "A", "G", "1", "100"]);
        assert_eq!(wide.table.rows()[1], vec!["rs1", "Ind2", "G", "G", "1", "100"]);
        assert!(wide.warnings.is_empty());
    }

    #[test]
    fn malformed_cell_becomes_missing() {
        let wide = parse("SNP\tchr\tpos\tInd1\tInd2\nrs3\t1\t100\tAA\tN\n").unwrap();
        assert_eq!(wide.table.rows()[1][2..4], ["N", "N"]);
    }

    #[test]
    fn multibyte_cells_are_counted_by_character() {
        let (a, b) = split_genotype("AÅ", "-");
        assert_eq!((a.as_str(), b.as_str()), ("A", "Å"));
        let (a, b) = split_genotype("ABC", "-");
        assert_eq!((a.as_str(), b.as_str()), ("-", "-"));
    }

    #[test]
    fn header_without_individuals_fails() {
        assert_eq!(
            parse("SNP\tchr\tpos\nrs1\t1\t100\n").unwrap_err(),
            FormatError::NoSampleColumns
        );
        assert_eq!(parse("").unwrap_err(), FormatError::EmptyInput);
    }

    #[test]
    fn short_lines_are_skipped_with_warning() {
        let wide = parse("SNP\tchr\tpos\tInd1\nrs1\t1\nrs2\t1\t200\tCC\n").unwrap();
        assert_eq!(wide.table.len(), 1);
        assert_eq!(
            wide.warnings,
            vec![ParseWarning {
                line: 2,
                kind: WarningKind::TooFewFields { found: 2 }
            }]
        );
    }

    #[test]
    fn genotype_count_mismatch_is_fatal() {
        let err = parse("SNP\tchr\tpos\tInd1\tInd2\n\nrs1\t1\t100\tAA\n").unwrap_err();
        assert_eq!(
            err,
            FormatError::ColumnCount {
                line: 3,
                expected: 2,
                found: 1
            }
        );
    }
}
