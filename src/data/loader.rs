use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use super::model::{CorrelationRow, CorrelationTable};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a correlation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.txt` / `.dat` / `.tbl` / none – whitespace columns `K  V  dV/dT`
/// * `.csv`  – header row with `kelvin` and `millivolt` columns
/// * `.json` – `[{ "kelvin": 1.4, "millivolt": 1.695 }, ...]`
pub fn load_file(path: &Path) -> Result<CorrelationTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "" | "txt" | "dat" | "tbl" => read_text_rows(BufReader::new(File::open(path)?))?,
        "csv" => read_csv_rows(File::open(path)?)?,
        "json" => read_json_rows(File::open(path)?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let table = into_table(rows, &path.display().to_string())?;
    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse whitespace-delimited text from any buffered reader.
pub fn parse_table<R: BufRead>(reader: R) -> Result<CorrelationTable, LoadError> {
    into_table(read_text_rows(reader)?, "input")
}

fn into_table(rows: Vec<CorrelationRow>, origin: &str) -> Result<CorrelationTable, LoadError> {
    if rows.is_empty() {
        return Err(LoadError::Empty {
            origin: origin.to_string(),
        });
    }
    Ok(CorrelationTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Text loader
// ---------------------------------------------------------------------------

/// One row per line: Kelvin, voltage and the dV/dT derivative. The derivative
/// must parse but is dropped. Lines that do not yield three numbers are
/// skipped.
fn read_text_rows<R: BufRead>(reader: R) -> Result<Vec<CorrelationRow>, LoadError> {
    let mut rows = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Some(row) => rows.push(row),
            None => debug!("Skipping line {}: {:?}", line_no + 1, line),
        }
    }

    Ok(rows)
}

fn parse_line(line: &str) -> Option<CorrelationRow> {
    let mut tokens = line.split_whitespace().map(parse_number);

    let kelvin = tokens.next()??;
    let millivolt = tokens.next()??;
    let _dvdt = tokens.next()??;

    Some(CorrelationRow::new(kelvin, millivolt))
}

/// A finite float; `inf` and `nan` spellings are rejected.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names.
/// `kelvin` and `millivolt` (or `voltage` / `volts`) are required; any other
/// column, such as `dvdt`, is ignored.
fn read_csv_rows<R: std::io::Read>(source: R) -> Result<Vec<CorrelationRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();

    let k_idx = headers
        .iter()
        .position(|h| h == "kelvin")
        .ok_or(LoadError::MissingColumn("kelvin"))?;
    let v_idx = headers
        .iter()
        .position(|h| matches!(h.as_str(), "millivolt" | "voltage" | "volts"))
        .ok_or(LoadError::MissingColumn("millivolt"))?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let kelvin = record.get(k_idx).and_then(parse_number);
        let millivolt = record.get(v_idx).and_then(parse_number);

        match (kelvin, millivolt) {
            (Some(k), Some(v)) => rows.push(CorrelationRow::new(k, v)),
            _ => debug!("Skipping CSV row {row_no}"),
        }
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn read_json_rows<R: std::io::Read>(source: R) -> Result<Vec<CorrelationRow>, LoadError> {
    Ok(serde_json::from_reader(BufReader::new(source))?)
}
