//! Per-SNP quality control over the genotype strings of one variant.
//!
//! Genotypes are compared as literal strings, so `AG` and `GA` count as two
//! different genotypes.

use std::collections::{BTreeSet, HashMap};

use crate::error::ValidationError;

/// Recognises missing genotype calls.
///
/// A call is missing when it equals the sentinel written twice or contains
/// the sentinel anywhere, so a half call such as `A-` is missing as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingGenotype {
    sentinel: String,
    marker: String,
}

impl MissingGenotype {
    /// `sentinel` must not be empty.
    pub fn new(sentinel: &str) -> Self {
        Self {
            sentinel: sentinel.to_string(),
            marker: sentinel.repeat(2),
        }
    }

    /// The full missing genotype, e.g. `--`.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_missing(&self, genotype: &str) -> bool {
        genotype == self.marker || genotype.contains(self.sentinel.as_str())
    }
}

/// Replace genotypes observed `min_count` times or fewer with the missing
/// marker. `min_count == 0` leaves the calls untouched.
///
/// Returns the number of calls rewritten.
pub fn check_genotype_count(
    genotypes: &mut [String],
    missing: &MissingGenotype,
    variant_id: &str,
    min_count: usize,
) -> usize {
    if min_count == 0 {
        return 0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genotype in genotypes.iter() {
        if !missing.is_missing(genotype) {
            *counts.entry(genotype.as_str()).or_default() += 1;
        }
    }

    let rare: BTreeSet<String> = counts
        .into_iter()
        .filter(|&(_, count)| count <= min_count)
        .map(|(genotype, _)| genotype.to_string())
        .collect();
    if rare.is_empty() {
        return 0;
    }

    tracing::info!(
        "SNP {}: genotypes {:?} appear <= {} times, setting to missing",
        variant_id,
        rare,
        min_count
    );

    let mut rewritten = 0;
    for genotype in genotypes.iter_mut() {
        if rare.contains(genotype.as_str()) {
            *genotype = missing.marker().to_string();
            rewritten += 1;
        }
    }
    rewritten
}

/// Fail when the non-missing calls of a SNP use more than two allele
/// characters. `variant_number` is the 1-based position of the SNP.
pub fn validate_biallelic(
    genotypes: &[String],
    missing: &MissingGenotype,
    variant_id: &str,
    variant_number: usize,
) -> Result<(), ValidationError> {
    let alleles: BTreeSet<char> = genotypes
        .iter()
        .filter(|genotype| !missing.is_missing(genotype))
        .flat_map(|genotype| genotype.chars())
        .collect();

    if alleles.len() > 2 {
        return Err(ValidationError::NotBiallelic {
            variant: variant_id.to_string(),
            variant_number,
            alleles: alleles.into_iter().collect(),
        });
    }
    Ok(())
}
