use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use meetcal_core::event::parse_row_timestamp;

use crate::source::{self, Input, Row};

/// Validate the input without producing output.
pub fn run(input: Option<&Path>) -> Result<ExitCode> {
    if check(input)? == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Check every input source, reporting each invalid one on stderr.
/// Returns the number of invalid sources.
pub fn check(input: Option<&Path>) -> Result<usize> {
    let sources = match Input::resolve(input)? {
        Input::Stdin => vec![None],
        Input::Files(paths) => paths.into_iter().map(Some).collect(),
    };

    let mut invalid = 0;
    for path in &sources {
        let result = match path {
            Some(path) => source::read_file(path).and_then(|rows| check_rows(&rows)),
            None => source::read_input(&Input::Stdin).and_then(|rows| check_rows(&rows)),
        };

        if let Err(e) = result {
            invalid += 1;
            eprintln!("{e:#}");
            if let Some(path) = path {
                eprintln!("Invalid file: {}", path.display());
            }
        }
    }

    tracing::info!(checked = sources.len(), invalid, "Check finished");
    Ok(invalid)
}

/// Fails on the first row whose timestamp is not a real date and time.
pub fn check_rows(rows: &[Row]) -> Result<()> {
    for row in rows {
        parse_row_timestamp(&row.timestamp).with_context(|| format!("Invalid line {row}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_rows_rejects_impossible_date() {
        let rows = source::read_rows("A;B;2024-13-01-00-00\n".as_bytes(), "t.csv").unwrap();
        let err = check_rows(&rows).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("t.csv:1"), "Got: {}", msg);
        assert!(msg.contains("2024-13-01-00-00"), "Got: {}", msg);
    }

    #[test]
    fn test_check_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "a.csv", "A;B;2024-06-01-19-30\n");
        write_csv(dir.path(), "b.csv", "C;D;2024-06-02-19-30\n");

        assert_eq!(check(Some(dir.path())).unwrap(), 0);
    }

    #[test]
    fn test_check_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "a.csv", "A;B;2024-06-01-19-30\n");
        write_csv(dir.path(), "b.csv", "broken line\n");

        assert_eq!(check(Some(dir.path())).unwrap(), 1);
    }
}
