//! Raw CSV loading.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, parse_csv_line};

/// Conventional location of the raw dataset, relative to the project root.
pub const DEFAULT_RAW_PATH: &str = "data/raw/Telco-Customer-Churn.csv";

/// Resolves [`DEFAULT_RAW_PATH`] against a project root.
pub fn default_raw_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_RAW_PATH)
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn read_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == ErrorKind::InvalidData {
        IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open_file(path)?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| read_error(path, e))?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads and validates the header row.
///
/// The header must name at least one column, every name must be non-empty
/// after trimming, and no name may repeat.
pub fn read_csv_schema(path: &Path) -> Result<CsvHeaders> {
    let file = open_file(path)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| read_error(path, e))?;

    if bytes == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let headers = CsvHeaders::new(parse_csv_line(line));

    if headers.is_empty() || headers.columns.iter().any(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if let Some(column) = headers.first_duplicate() {
        return Err(IngestError::DuplicateColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        });
    }

    Ok(headers)
}

/// Loads a comma-delimited file with a header row, without any cleaning.
///
/// Column types are inferred from the whole file, so a column with a single
/// non-numeric value anywhere (such as a blank `TotalCharges`) is read as a
/// string column.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path does not exist
/// - [`IngestError::UnsupportedEncoding`] for UTF-16 input
/// - [`IngestError::EmptyCsv`], [`IngestError::NoHeaderDetected`] or
///   [`IngestError::DuplicateColumn`] for an unusable header
/// - [`IngestError::CsvParse`] if the body is not valid delimited text
pub fn load_raw(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    let headers = read_csv_schema(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let df = apply_header_names(df, &headers, path)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = headers.len(),
        "loaded raw table"
    );

    Ok(df)
}

/// Renames the frame's columns to the trimmed header names.
fn apply_header_names(mut df: DataFrame, headers: &CsvHeaders, path: &Path) -> Result<DataFrame> {
    if df.width() != headers.len() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header names {} columns but {} were read",
                headers.len(),
                df.width()
            ),
        });
    }
    let renamed = df
        .get_column_names()
        .iter()
        .zip(&headers.columns)
        .any(|(read, header)| read.as_str() != header.as_str());
    if renamed {
        df.set_column_names(headers.columns.iter().map(String::as_str))?;
        debug!(path = %path.display(), "trimmed whitespace around column names");
    }
    Ok(df)
}
