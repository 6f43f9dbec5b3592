use clap::ValueEnum;
use serde::Serialize;

use crate::error::ConvertError;

/// Maps the six normalized fields to literal column headers of the input.
///
/// Defaults are the Illumina Final Report headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub snp_name: String,
    pub sample_id: String,
    pub allele1: String,
    pub allele2: String,
    pub chromosome: String,
    pub position: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            snp_name: String::from("SNP Name"),
            sample_id: String::from("Sample ID"),
            allele1: String::from("Allele1 - Top"),
            allele2: String::from("Allele2 - Top"),
            chromosome: String::from("Chr"),
            position: String::from("Position"),
        }
    }
}

impl ColumnMap {
    pub const KEYS: [&'static str; 6] = [
        "snp_name",
        "sample_id",
        "allele1",
        "allele2",
        "chromosome",
        "position",
    ];

    /// Override the header for one internal key.
    pub fn set(&mut self, key: &str, header: impl Into<String>) -> Result<(), ConvertError> {
        let slot = match key {
            "snp_name" => &mut self.snp_name,
            "sample_id" => &mut self.sample_id,
            "allele1" => &mut self.allele1,
            "allele2" => &mut self.allele2,
            "chromosome" => &mut self.chromosome,
            "position" => &mut self.position,
            other => {
                return Err(ConvertError::Config(format!(
                    "unknown column key '{other}'; expected one of {:?}",
                    Self::KEYS
                )));
            }
        };
        *slot = header.into();
        Ok(())
    }

    /// Headers in normalized field order: variant, sample, allele1, allele2,
    /// chromosome, position.
    pub fn required(&self) -> [&str; 6] {
        [
            &self.snp_name,
            &self.sample_id,
            &self.allele1,
            &self.allele2,
            &self.chromosome,
            &self.position,
        ]
    }
}

/// PED sex code applied to every individual.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[value(alias = "1")]
    Male,
    #[value(alias = "2")]
    Female,
    #[value(alias = "3")]
    Unknown,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
            Sex::Unknown => 3,
        }
    }
}

/// Engine settings shared by both input layouts.
#[derive(Debug, Clone, Serialize)]
pub struct ConverterOptions {
    pub column_map: ColumnMap,
    /// Allele token meaning "no call". Typically `-` for Illumina reports
    /// and `N` or `NN` for wide tables.
    pub missing_genotype: String,
    /// Genotypes seen this many times or fewer for a SNP become missing.
    /// `0` disables the filter.
    pub min_genotype_count: usize,
    pub sex: Sex,
    pub phenotype: i32,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            column_map: ColumnMap::default(),
            missing_genotype: String::from("-"),
            min_genotype_count: 0,
            sex: Sex::Unknown,
            phenotype: -9,
        }
    }
}

impl ConverterOptions {
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.missing_genotype.is_empty() {
            return Err(ConvertError::Config(String::from(
                "missing genotype sentinel must not be empty",
            )));
        }
        Ok(())
    }
}
