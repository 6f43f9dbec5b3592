use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ped::PedOutput;

/// Files written for one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub map: PathBuf,
    pub ped: PathBuf,
    pub ids: PathBuf,
}

impl OutputPaths {
    /// `<prefix>.map`, `<prefix>.ped` and `<prefix>_id.txt`.
    ///
    /// An extension already on the prefix is replaced for MAP and PED.
    pub fn for_prefix(prefix: &Path) -> Self {
        let mut ids = OsString::from(prefix.as_os_str());
        ids.push("_id.txt");
        Self {
            map: prefix.with_extension("map"),
            ped: prefix.with_extension("ped"),
            ids: PathBuf::from(ids),
        }
    }
}

/// Write the MAP, PED and sample-id files next to `prefix`.
pub fn write_plink_text(prefix: &Path, output: &PedOutput) -> Result<OutputPaths> {
    let paths = OutputPaths::for_prefix(prefix);
    write_lines(&paths.map, &output.map, "MAP")?;
    write_lines(&paths.ped, &output.ped, "PED")?;
    write_lines(&paths.ids, &output.individuals, "ID")?;
    Ok(paths)
}

fn write_lines(path: &Path, lines: &[String], label: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {label} file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}")
            .with_context(|| format!("failed to write {label} file {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {label} file {}", path.display()))?;
    tracing::info!("wrote {} file ({} lines): {}", label, lines.len(), path.display());
    Ok(())
}
