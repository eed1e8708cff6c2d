//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{DEFAULT_RAW_PATH, default_raw_path, load_raw, read_csv_schema, validate_encoding};
