use std::collections::{BTreeSet, HashMap};

use genoped::{Converter, ConverterOptions, InputFormat, PedOutput};
use proptest::prelude::*;

/// Per-SNP allele choices: two bases and the missing allele.
const ALLELES: [[char; 3]; 6] = [
    ['A', 'G', '-'],
    ['C', 'T', '-'],
    ['A', 'C', '-'],
    ['G', 'T', '-'],
    ['A', 'T', '-'],
    ['C', 'G', '-'],
];

/// (snp, sample, allele1 choice, allele2 choice)
type Call = (usize, usize, usize, usize);

fn calls() -> impl Strategy<Value = Vec<Call>> {
    proptest::collection::vec((0..6usize, 0..8usize, 0..3usize, 0..3usize), 1..80)
}

fn report(calls: &[Call]) -> String {
    let mut text = String::from(
        "[Header]\nGSGT Version\t2.0.4\n[Data]\nSNP Name\tSample ID\tAllele1 - Top\tAllele2 - Top\tChr\tPosition\n",
    );
    for &(snp, sample, a, b) in calls {
        text.push_str(&format!(
            "rs{snp}\tS{sample}\t{}\t{}\t{}\t{}\n",
            ALLELES[snp][a],
            ALLELES[snp][b],
            snp % 3 + 1,
            1000 + snp
        ));
    }
    text
}

fn first_seen(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    ids.filter(|id| seen.insert(id.clone())).collect()
}

fn convert(text: &str, options: ConverterOptions, format: InputFormat) -> PedOutput {
    Converter::new(options)
        .unwrap()
        .convert_text(text, format)
        .unwrap()
        .output
}

/// Genotype fields of a PED line, as (allele1, allele2) pairs.
fn ped_genotypes(line: &str) -> Vec<(String, String)> {
    let fields: Vec<&str> = line.split('\t').skip(6).collect();
    fields
        .chunks(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect()
}

/// Render a conversion back as a wide table whose uncalled cells are `00`.
fn as_wide(output: &PedOutput) -> String {
    let mut text = format!("SNP\tchr\tpos\t{}\n", output.individuals.join("\t"));
    let rows: Vec<Vec<(String, String)>> = output.ped.iter().map(|l| ped_genotypes(l)).collect();
    for (v, line) in output.map.iter().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        text.push_str(&format!("{}\t{}\t{}", fields[1], fields[0], fields[3]));
        for row in &rows {
            text.push_str(&format!("\t{}{}", row[v].0, row[v].1));
        }
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn output_order_follows_first_appearance(calls in calls()) {
        let output = convert(&report(&calls), ConverterOptions::default(), InputFormat::Illumina);

        let snps = first_seen(calls.iter().map(|c| format!("rs{}", c.0)));
        let samples = first_seen(calls.iter().map(|c| format!("S{}", c.1)));
        let map_ids: Vec<String> = output
            .map
            .iter()
            .map(|line| line.split('\t').nth(1).unwrap().to_string())
            .collect();

        prop_assert_eq!(map_ids, snps);
        prop_assert_eq!(&output.individuals, &samples);
        let ped_ids: Vec<String> = output
            .ped
            .iter()
            .map(|line| line.split('\t').next().unwrap().to_string())
            .collect();
        prop_assert_eq!(ped_ids, samples);
    }

    #[test]
    fn matrix_is_full_and_biallelic(calls in calls(), min_count in 0usize..3) {
        let options = ConverterOptions { min_genotype_count: min_count, ..ConverterOptions::default() };
        let output = convert(&report(&calls), options, InputFormat::Illumina);

        let rows: Vec<Vec<(String, String)>> = output.ped.iter().map(|l| ped_genotypes(l)).collect();
        for row in &rows {
            prop_assert_eq!(row.len(), output.map.len());
        }
        for v in 0..output.map.len() {
            let alleles: BTreeSet<&str> = rows
                .iter()
                .flat_map(|row| [row[v].0.as_str(), row[v].1.as_str()])
                .filter(|allele| *allele != "0")
                .collect();
            prop_assert!(alleles.len() <= 2);
        }
    }

    #[test]
    fn zero_threshold_keeps_every_last_call(calls in calls()) {
        let text = report(&calls);
        let conversion = Converter::new(ConverterOptions::default())
            .unwrap()
            .convert_text(&text, InputFormat::Illumina)
            .unwrap();
        prop_assert_eq!(conversion.summary.filtered_genotypes, 0);

        let mut last: HashMap<(String, String), (char, char)> = HashMap::new();
        for &(snp, sample, a, b) in &calls {
            last.insert((format!("rs{snp}"), format!("S{sample}")), (ALLELES[snp][a], ALLELES[snp][b]));
        }

        let output = conversion.output;
        for (s, line) in output.ped.iter().enumerate() {
            let genotypes = ped_genotypes(line);
            for (v, map_line) in output.map.iter().enumerate() {
                let snp = map_line.split('\t').nth(1).unwrap().to_string();
                let expected = match last.get(&(snp, output.individuals[s].clone())) {
                    Some(&(a, b)) if a != '-' && b != '-' => (a.to_string(), b.to_string()),
                    _ => (String::from("0"), String::from("0")),
                };
                prop_assert_eq!(&genotypes[v], &expected);
            }
        }
    }

    #[test]
    fn converting_output_again_is_idempotent(calls in calls(), min_count in 0usize..3) {
        let options = ConverterOptions { min_genotype_count: min_count, ..ConverterOptions::default() };
        let first = convert(&report(&calls), options, InputFormat::Illumina);

        let again = ConverterOptions { missing_genotype: String::from("0"), ..ConverterOptions::default() };
        let second = convert(&as_wide(&first), again, InputFormat::Wide);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn parsers_never_panic(text in "[\\[\\]A-Za-z0-9\\t\\n -]{0,400}") {
        let converter = Converter::new(ConverterOptions::default()).unwrap();
        let _ = converter.convert_text(&text, InputFormat::Illumina);
        let _ = converter.convert_text(&text, InputFormat::Wide);
    }
}
