use crate::Rates::errors::{RateError, RateResult};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whitespace-delimited text file as written by the box model: one header line
/// followed by data rows. Rows keep their 1-based line number for error reports.
#[derive(Debug, Clone)]
pub struct WhitespaceTable {
    pub file_name: String,
    pub header: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

impl WhitespaceTable {
    /// builds a parse error pointing at `line` of this file
    pub fn parse_error(&self, line: usize, message: impl Into<String>) -> RateError {
        RateError::Parse {
            path: self.file_name.clone(),
            line,
            message: message.into(),
        }
    }
}

/// Reads a whitespace-delimited file. The first line is the header, blank lines are skipped.
pub fn load_whitespace_table(file_name: &str) -> RateResult<WhitespaceTable> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(RateError::NotFound(file_name.to_string()));
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut header = Vec::new();
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if i == 0 {
            header = fields;
            continue;
        }
        if fields.is_empty() {
            continue;
        }
        rows.push((i + 1, fields));
    }
    debug!("header of '{}': {:?}", file_name, header);
    info!("Read {} data rows from file '{}'", rows.len(), file_name);
    Ok(WhitespaceTable {
        file_name: file_name.to_string(),
        header,
        rows,
    })
}

/// parses one numeric field of a row, reporting file and line on failure
pub fn parse_field<T: std::str::FromStr>(
    table: &WhitespaceTable,
    line: usize,
    fields: &[String],
    column: usize,
    what: &str,
) -> RateResult<T> {
    let raw = fields
        .get(column)
        .ok_or_else(|| table.parse_error(line, format!("missing column {} ({})", column, what)))?;
    raw.parse::<T>()
        .map_err(|_| table.parse_error(line, format!("cannot parse {} from '{}'", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_whitespace_table() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "t   speciesNumber   speciesName").unwrap();
        writeln!(temp_file, "0.0   1   NO2").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "  1.0\t2   O3  ").unwrap();

        let table = load_whitespace_table(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(table.header, vec!["t", "speciesNumber", "speciesName"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].0, 2);
        assert_eq!(table.rows[1].0, 4);
        assert_eq!(table.rows[1].1, vec!["1.0", "2", "O3"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_whitespace_table("definitely/not/here/productionRates.output");
        assert!(matches!(result, Err(RateError::NotFound(_))));
    }

    #[test]
    fn test_parse_field_reports_line() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "header").unwrap();
        writeln!(temp_file, "abc 1").unwrap();
        let table = load_whitespace_table(temp_file.path().to_str().unwrap()).unwrap();
        let (line, fields) = &table.rows[0];
        let time: RateResult<f64> = parse_field(&table, *line, fields, 0, "time");
        match time {
            Err(RateError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
        let number: u32 = parse_field(&table, *line, fields, 1, "number").unwrap();
        assert_eq!(number, 1);
        let missing: RateResult<u32> = parse_field(&table, *line, fields, 5, "rate");
        assert!(missing.is_err());
    }
}
