//! Sample × variant genotype matrix.
//!
//! Rows are grouped by variant, quality-controlled one variant at a time on
//! the rayon pool, then written into pre-assigned cells. When calls repeat for
//! the same sample and variant, the last one in input order wins.

use rayon::prelude::*;

use crate::error::ValidationError;
use crate::index::GenotypeIndex;
use crate::normalize::GenotypeRow;
use crate::qc::{MissingGenotype, check_genotype_count, validate_biallelic};

/// One matrix cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    /// No call for this sample and variant in the input.
    #[default]
    Uncalled,
    /// An explicit missing call, or one removed by quality control.
    Missing,
    Called(char, char),
}

impl Cell {
    /// The two alleles as written to PED, `0` for no call.
    pub fn alleles(self) -> (char, char) {
        match self {
            Cell::Uncalled | Cell::Missing => ('0', '0'),
            Cell::Called(a, b) => (a, b),
        }
    }
}

/// Dense, sample-major genotype matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeMatrix {
    samples: usize,
    variants: usize,
    cells: Vec<Cell>,
}

impl GenotypeMatrix {
    pub fn new(samples: usize, variants: usize) -> Self {
        Self {
            samples,
            variants,
            cells: vec![Cell::Uncalled; samples * variants],
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn variants(&self) -> usize {
        self.variants
    }

    pub fn get(&self, sample: usize, variant: usize) -> Cell {
        self.cells[sample * self.variants + variant]
    }

    /// Store `cell`, returning the previous value.
    pub fn set(&mut self, sample: usize, variant: usize, cell: Cell) -> Cell {
        std::mem::replace(&mut self.cells[sample * self.variants + variant], cell)
    }

    /// All cells of one sample, in variant order.
    pub fn row(&self, sample: usize) -> &[Cell] {
        let start = sample * self.variants;
        &self.cells[start..start + self.variants]
    }
}

/// Counters gathered while filling the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    pub filtered_genotypes: usize,
    pub missing_calls: usize,
    pub uncalled_cells: usize,
    pub overwritten_calls: usize,
}

#[derive(Debug, Default)]
struct VariantGroup {
    samples: Vec<usize>,
    genotypes: Vec<String>,
}

#[derive(Debug)]
struct VariantFill {
    cells: Vec<(usize, Cell)>,
    filtered: usize,
}

/// Build the matrix for `rows`, which must be the rows `index` was built from.
///
/// When several variants fail validation the earliest one in variant order is
/// reported.
pub fn build_matrix(
    rows: &[GenotypeRow],
    index: &GenotypeIndex,
    missing_genotype: &str,
    min_genotype_count: usize,
) -> Result<(GenotypeMatrix, FillStats), ValidationError> {
    let missing = MissingGenotype::new(missing_genotype);

    let mut groups: Vec<VariantGroup> = (0..index.variants().len())
        .map(|_| VariantGroup::default())
        .collect();
    for (row, key) in rows.iter().zip(index.row_keys()) {
        let group = &mut groups[key.variant];
        group.samples.push(key.sample);
        group.genotypes.push(row.genotype());
    }

    let fills: Vec<Result<VariantFill, ValidationError>> = groups
        .into_par_iter()
        .enumerate()
        .map(|(variant, group)| fill_variant(variant, group, index, &missing, min_genotype_count))
        .collect();

    let mut matrix = GenotypeMatrix::new(index.samples().len(), index.variants().len());
    let mut stats = FillStats::default();
    for (variant, fill) in fills.into_iter().enumerate() {
        let fill = fill?;
        stats.filtered_genotypes += fill.filtered;
        for (sample, cell) in fill.cells {
            if cell == Cell::Missing {
                stats.missing_calls += 1;
            }
            if matrix.set(sample, variant, cell) != Cell::Uncalled {
                stats.overwritten_calls += 1;
                tracing::warn!(
                    variant = %index.variants()[variant].id,
                    sample = %index.samples()[sample],
                    "duplicate genotype call, keeping the last one"
                );
            }
        }
    }
    stats.uncalled_cells = matrix
        .cells
        .iter()
        .filter(|&&cell| cell == Cell::Uncalled)
        .count();

    Ok((matrix, stats))
}

fn fill_variant(
    variant: usize,
    mut group: VariantGroup,
    index: &GenotypeIndex,
    missing: &MissingGenotype,
    min_genotype_count: usize,
) -> Result<VariantFill, ValidationError> {
    let variant_id = index.variants()[variant].id.as_str();
    let filtered = check_genotype_count(
        &mut group.genotypes,
        missing,
        variant_id,
        min_genotype_count,
    );
    validate_biallelic(&group.genotypes, missing, variant_id, variant + 1)?;

    let cells = group
        .samples
        .into_iter()
        .zip(group.genotypes)
        .map(|(sample, genotype)| {
            if missing.is_missing(&genotype) {
                return Ok((sample, Cell::Missing));
            }
            let mut chars = genotype.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => Ok((sample, Cell::Called(a, b))),
                _ => Err(ValidationError::GenotypeLength {
                    variant: variant_id.to_string(),
                    sample: index.samples()[sample].clone(),
                    genotype,
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(VariantFill { cells, filtered })
}
