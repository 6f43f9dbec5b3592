use crate::config::ColumnMap;
use crate::error::FormatError;
use crate::table::RawTable;

/// One genotype call with its variant coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeRow {
    pub variant_id: String,
    pub sample_id: String,
    pub allele1: String,
    pub allele2: String,
    pub chromosome: String,
    pub position: String,
}

impl GenotypeRow {
    /// The two alleles concatenated, e.g. `AG`.
    pub fn genotype(&self) -> String {
        let mut genotype = String::with_capacity(self.allele1.len() + self.allele2.len());
        genotype.push_str(&self.allele1);
        genotype.push_str(&self.allele2);
        genotype
    }
}

/// Resolve the six required columns and project every row onto them.
pub fn normalize(table: &RawTable, columns: &ColumnMap) -> Result<Vec<GenotypeRow>, FormatError> {
    let required = columns.required();
    let mut indices = [0usize; 6];
    let mut missing = Vec::new();
    for (slot, name) in indices.iter_mut().zip(required) {
        match table.column_index(name) {
            Some(index) => *slot = index,
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(FormatError::MissingColumns {
            missing,
            available: table.columns().to_vec(),
        });
    }

    let [variant, sample, allele1, allele2, chromosome, position] = indices;
    Ok(table
        .rows()
        .iter()
        .map(|row| GenotypeRow {
            variant_id: row[variant].clone(),
            sample_id: row[sample].clone(),
            allele1: row[allele1].clone(),
            allele2: row[allele2].clone(),
            chromosome: row[chromosome].clone(),
            position: row[position].clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::split_fields;

    fn table(header: &str, rows: &[&str]) -> RawTable {
        let mut table = RawTable::new(split_fields(header));
        for (i, row) in rows.iter().enumerate() {
            table.push_row(i + 2, split_fields(row)).unwrap();
        }
        table
    }

    #[test]
    fn projects_columns_in_any_order() {
        let table = table(
            "Position\tChr\tGC Score\tAllele2 - Top\tAllele1 - Top\tSample ID\tSNP Name",
            &["100\t2\t0.9\tG\tA\tS1\trs1"],
        );
        let rows = normalize(&table, &ColumnMap::default()).unwrap();
        assert_eq!(
            rows,
            vec![GenotypeRow {
                variant_id: "rs1".into(),
                sample_id: "S1".into(),
                allele1: "A".into(),
                allele2: "G".into(),
                chromosome: "2".into(),
                position: "100".into(),
            }]
        );
        assert_eq!(rows[0].genotype(), "AG");
    }

    #[test]
    fn reports_missing_and_available_columns() {
        let table = table("SNP Name\tSample ID\tChr\tPosition", &[]);
        let err = normalize(&table, &ColumnMap::default()).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingColumns {
                missing: vec!["Allele1 - Top".into(), "Allele2 - Top".into()],
                available: vec![
                    "SNP Name".into(),
                    "Sample ID".into(),
                    "Chr".into(),
                    "Position".into()
                ],
            }
        );
    }
}
