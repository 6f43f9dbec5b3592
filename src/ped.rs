//! Rendering of PLINK text MAP and PED lines.

use crate::config::Sex;
use crate::index::GenotypeIndex;
use crate::matrix::GenotypeMatrix;

/// The three line sequences a conversion produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PedOutput {
    /// `chr<TAB>snp<TAB>0<TAB>position`, one per variant.
    pub map: Vec<String>,
    /// `fid<TAB>iid<TAB>0<TAB>0<TAB>sex<TAB>phenotype<TAB>genotypes...`, one per sample.
    pub ped: Vec<String>,
    /// Sample identifiers in PED order.
    pub individuals: Vec<String>,
}

/// PLINK has no `PseudoX` chromosome code; the pseudo-autosomal region is `XY`.
pub fn plink_chromosome(chromosome: &str) -> &str {
    if chromosome == "PseudoX" {
        "XY"
    } else {
        chromosome
    }
}

pub fn assemble(
    index: &GenotypeIndex,
    matrix: &GenotypeMatrix,
    sex: Sex,
    phenotype: i32,
) -> PedOutput {
    let map = index
        .variants()
        .iter()
        .map(|variant| {
            format!(
                "{}\t{}\t0\t{}",
                plink_chromosome(&variant.chromosome),
                variant.id,
                variant.position
            )
        })
        .collect();

    let sex = sex.code();
    let ped = index
        .samples()
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let genotypes = matrix
                .row(i)
                .iter()
                .map(|cell| {
                    let (a, b) = cell.alleles();
                    format!("{a}\t{b}")
                })
                .collect::<Vec<_>>()
                .join("\t");
            format!("{sample}\t{sample}\t0\t0\t{sex}\t{phenotype}\t{genotypes}")
        })
        .collect();

    PedOutput {
        map,
        ped,
        individuals: index.samples().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Cell;
    use crate::normalize::GenotypeRow;

    fn row(variant: &str, sample: &str, chromosome: &str) -> GenotypeRow {
        GenotypeRow {
            variant_id: variant.into(),
            sample_id: sample.into(),
            allele1: "A".into(),
            allele2: "G".into(),
            chromosome: chromosome.into(),
            position: "500".into(),
        }
    }

    #[test]
    fn renders_map_and_ped_lines() {
        let rows = vec![row("rs1", "S1", "PseudoX"), row("rs2", "S2", "5")];
        let index = GenotypeIndex::build(&rows);
        let mut matrix = GenotypeMatrix::new(2, 2);
        matrix.set(0, 0, Cell::Called('A', 'G'));
        matrix.set(1, 1, Cell::Missing);

        let output = assemble(&index, &matrix, Sex::Female, -9);
        assert_eq!(output.map, ["XY\trs1\t0\t500", "5\trs2\t0\t500"]);
        assert_eq!(
            output.ped,
            [
                "S1\tS1\t0\t0\t2\t-9\tA\tG\t0\t0",
                "S2\tS2\t0\t0\t2\t-9\t0\t0\t0\t0"
            ]
        );
        assert_eq!(output.individuals, ["S1", "S2"]);
    }

    #[test]
    fn pseudo_x_is_the_only_renamed_chromosome() {
        assert_eq!(plink_chromosome("PseudoX"), "XY");
        assert_eq!(plink_chromosome("X"), "X");
        assert_eq!(plink_chromosome("pseudox"), "pseudox");
    }
}
