use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const FILE_PREFIX: &str = "raw_telugu_";
const FILE_SUFFIX: &str = ".txt";

/// Next free `raw_telugu_N.txt` in `dir`: one past the highest existing N.
pub fn next_output_path(dir: &Path) -> Result<PathBuf> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("cannot list output dir {}", dir.display()))?;

    let max = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| run_number(&e.file_name().to_string_lossy()))
        .max();

    let n = max.map_or(1, |m| m + 1);
    Ok(dir.join(format!("{}{}{}", FILE_PREFIX, n, FILE_SUFFIX)))
}

fn run_number(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_SUFFIX)?
        .parse()
        .ok()
}

/// One record per line, each newline-terminated. Refuses to overwrite.
pub fn write_records(path: &Path, records: &[String]) -> Result<()> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    for record in records {
        w.write_all(record.as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.flush()
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Paragraphs from a saved text file: one per line, blank lines skipped.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
