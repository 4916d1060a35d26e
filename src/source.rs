//! Input discovery and line validation.
//!
//! Rows come from `*.csv` files or standard input, one `location;summary;timestamp`
//! record per line.

use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use meetcal_core::event::is_row_timestamp_shape;

/// Where rows are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Files(Vec<PathBuf>),
}

impl Input {
    /// Resolve the `--input` argument.
    ///
    /// A directory means every `*.csv` file directly inside it, in file-name
    /// order. No argument or `-` means standard input.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Input::Stdin),
            Some(p) if p == Path::new("-") => Ok(Input::Stdin),
            Some(p) if p.is_dir() => Ok(Input::Files(list_csv_files(p)?)),
            Some(p) => Ok(Input::Files(vec![p.to_path_buf()])),
        }
    }
}

/// A validated input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub origin: String,
    pub line: usize,
    pub location: String,
    pub summary: String,
    pub timestamp: String,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {};{};{}",
            self.origin, self.line, self.location, self.summary, self.timestamp
        )
    }
}

/// List `*.csv` files directly inside `dir`, sorted by name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();

    tracing::debug!(dir = %dir.display(), count = files.len(), "Found input files");
    Ok(files)
}

/// Read every row of the input, failing on the first malformed line.
pub fn read_input(input: &Input) -> Result<Vec<Row>> {
    match input {
        Input::Stdin => read_rows(std::io::stdin().lock(), "<stdin>"),
        Input::Files(paths) => {
            let mut rows = Vec::new();
            for path in paths {
                rows.extend(read_file(path)?);
            }
            Ok(rows)
        }
    }
}

pub fn read_file(path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    read_rows(BufReader::new(file), &path.display().to_string())
}

/// Split and validate lines read from `reader`.
///
/// Blank lines are skipped. Every other line must have exactly three
/// `;`-separated fields, the last shaped like `YYYY-MM-DD-HH-MM`.
pub fn read_rows(reader: impl BufRead, origin: &str) -> Result<Vec<Row>> {
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read {origin}:{line_no}"))?;

        if line.trim().is_empty() {
            continue;
        }

        rows.push(parse_line(&line, origin, line_no)?);
    }

    tracing::debug!(origin, count = rows.len(), "Read rows");
    Ok(rows)
}

fn parse_line(line: &str, origin: &str, line_no: usize) -> Result<Row> {
    let fields: Vec<&str> = line.split(';').collect();
    let [location, summary, timestamp] = fields.as_slice() else {
        bail!(
            "Invalid line {origin}:{line_no}: expected 3 fields separated by ';', got {}: {line}",
            fields.len()
        );
    };

    if !is_row_timestamp_shape(timestamp) {
        bail!("Invalid line {origin}:{line_no}: timestamp must be YYYY-MM-DD-HH-MM: {line}");
    }

    Ok(Row {
        origin: origin.to_string(),
        line: line_no,
        location: location.to_string(),
        summary: summary.to_string(),
        timestamp: timestamp.to_string(),
    })
}
