use std::collections::HashMap;

use crate::normalize::GenotypeRow;

/// A SNP as first seen in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: String,
    pub chromosome: String,
    pub position: String,
}

/// Matrix coordinates of one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowKey {
    pub variant: usize,
    pub sample: usize,
}

/// First-appearance ordering of variants and samples.
///
/// Indices are zero-based positions in [`variants`](Self::variants) and
/// [`samples`](Self::samples). The coordinates of every indexed row are kept
/// so the matrix can be filled without looking identifiers up again.
#[derive(Debug, Clone, Default)]
pub struct GenotypeIndex {
    variants: Vec<Variant>,
    samples: Vec<String>,
    variant_lookup: HashMap<String, usize>,
    sample_lookup: HashMap<String, usize>,
    row_keys: Vec<RowKey>,
}

impl GenotypeIndex {
    pub fn build(rows: &[GenotypeRow]) -> Self {
        let mut index = Self {
            row_keys: Vec::with_capacity(rows.len()),
            ..Self::default()
        };
        for row in rows {
            let variant = match index.variant_lookup.get(&row.variant_id) {
                Some(&variant) => variant,
                None => {
                    let variant = index.variants.len();
                    index.variant_lookup.insert(row.variant_id.clone(), variant);
                    index.variants.push(Variant {
                        id: row.variant_id.clone(),
                        chromosome: row.chromosome.clone(),
                        position: row.position.clone(),
                    });
                    variant
                }
            };
            let sample = match index.sample_lookup.get(&row.sample_id) {
                Some(&sample) => sample,
                None => {
                    let sample = index.samples.len();
                    index.sample_lookup.insert(row.sample_id.clone(), sample);
                    index.samples.push(row.sample_id.clone());
                    sample
                }
            };
            index.row_keys.push(RowKey { variant, sample });
        }
        index
    }

    /// Coordinates of the indexed rows, in input order.
    pub fn row_keys(&self) -> &[RowKey] {
        &self.row_keys
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn variant_index(&self, id: &str) -> Option<usize> {
        self.variant_lookup.get(id).copied()
    }

    pub fn sample_index(&self, id: &str) -> Option<usize> {
        self.sample_lookup.get(id).copied()
    }
}
