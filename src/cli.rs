use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    ColumnMap, ConversionConfig, ConverterOptions, FileConversion, InputFormat, Sex, convert_file,
};

#[derive(Debug, Parser)]
#[command(name = "genoped", author, version, about = "Convert genotype files to PLINK MAP/PED format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a genotype file to PLINK MAP/PED
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Input genotype file (plain or gzip-compressed)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output prefix; creates <prefix>.map, <prefix>.ped and <prefix>_id.txt
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Input file format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = InputFormat::Illumina)]
    format: InputFormat,

    /// Missing genotype allele in the input ('-' for Illumina, e.g. 'N' for wide tables)
    #[arg(long, default_value = "-")]
    missing: String,

    /// Genotypes appearing this many times or fewer for a SNP are set to missing (0 disables)
    #[arg(long, default_value_t = 0)]
    min_count: usize,

    /// Sex code written for every individual (1=male, 2=female, 3=unknown)
    #[arg(long, value_enum, default_value_t = Sex::Unknown)]
    sex: Sex,

    /// Phenotype written for every individual
    #[arg(long, default_value_t = -9, allow_negative_numbers = true)]
    phenotype: i32,

    /// Override an input column header, e.g. --column allele1="Allele1 - Forward"
    #[arg(long = "column", value_name = "KEY=HEADER", value_parser = parse_column)]
    columns: Vec<(String, String)>,

    /// Also write <prefix>_report.json describing the run
    #[arg(long)]
    report: bool,

    /// Worker threads for per-SNP quality control (defaults to all cores)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Logging verbosity (e.g. error, warn, info, debug)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable debug logging
    #[arg(short = 'V', long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => convert(args),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    init_logging(if args.verbose { "debug" } else { args.log_level.as_str() });

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let mut options = ConverterOptions {
        missing_genotype: args.missing,
        min_genotype_count: args.min_count,
        sex: args.sex,
        phenotype: args.phenotype,
        ..ConverterOptions::default()
    };
    for (key, header) in args.columns {
        options.column_map.set(&key, header)?;
    }

    let result = convert_file(ConversionConfig {
        input: args.input,
        input_format: args.format,
        output_prefix: args.output,
        options,
        write_report: args.report,
    })?;
    print_summary(&result);

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

fn parse_column(raw: &str) -> Result<(String, String), String> {
    let (key, header) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=HEADER, got '{raw}'"))?;
    let key = key.trim();
    if !ColumnMap::KEYS.contains(&key) {
        return Err(format!(
            "unknown column key '{key}'; expected one of {:?}",
            ColumnMap::KEYS
        ));
    }
    Ok((key.to_string(), header.to_string()))
}

fn print_summary(result: &FileConversion) {
    let summary = &result.summary;
    println!(
        "\nConverted {format} input: {variants} SNPs, {samples} individuals.",
        format = result.format.name(),
        variants = summary.variants,
        samples = summary.samples,
    );

    println!("Done! Output files:");
    println!("  map: {}", result.paths.map.display());
    println!("  ped: {}", result.paths.ped.display());
    println!("   id: {}", result.paths.ids.display());
    if let Some(report) = &result.report {
        println!("  report: {}", report.display());
    }

    if summary.filtered_genotypes > 0 {
        println!(
            "Set {count} low-count genotype calls to missing.",
            count = summary.filtered_genotypes
        );
    }

    if summary.skipped_lines > 0 {
        println!(
            "Ignored {count} malformed input lines.",
            count = summary.skipped_lines
        );
    }

    if summary.overwritten_calls > 0 {
        println!(
            "Warning: {count} duplicate genotype calls were replaced by later ones.",
            count = summary.overwritten_calls
        );
    }
}
