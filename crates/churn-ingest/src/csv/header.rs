//! CSV header parsing and normalization.

use std::collections::BTreeSet;

/// Column names read from the header row of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names (trimmed), in file order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    /// Creates headers from already-normalized column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if the header names this column.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Returns the first column name that appears more than once.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.columns
            .iter()
            .find(|name| !seen.insert(name.as_str()))
            .map(String::as_str)
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a CSV line into fields, handling quoted values.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line_simple() {
        let fields = parse_csv_line("customerID,gender,tenure");
        assert_eq!(fields, vec!["customerID", "gender", "tenure"]);
    }

    #[test]
    fn test_parse_csv_line_quoted_comma() {
        let fields = parse_csv_line(r#"PaymentMethod,"Bank transfer, automatic",Churn"#);
        assert_eq!(fields, vec!["PaymentMethod", "Bank transfer, automatic", "Churn"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quote() {
        let fields = parse_csv_line(r#""say ""hi""",b"#);
        assert_eq!(fields, vec![r#"say "hi""#, "b"]);
    }

    #[test]
    fn test_parse_csv_line_trims_fields() {
        let fields = parse_csv_line(" tenure , Churn ");
        assert_eq!(fields, vec!["tenure", "Churn"]);
    }

    #[test]
    fn test_first_duplicate() {
        let headers = CsvHeaders::new(vec![
            "tenure".to_string(),
            "Churn".to_string(),
            "tenure".to_string(),
        ]);
        assert_eq!(headers.first_duplicate(), Some("tenure"));
        assert!(headers.contains("Churn"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_no_duplicate() {
        let headers = CsvHeaders::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(headers.first_duplicate(), None);
    }
}
