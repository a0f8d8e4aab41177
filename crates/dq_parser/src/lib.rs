//! Parser for rule tables (CSV/YAML/TOML/JSON formats).
//!
//! This module loads rule tables from files into [`RawRule`] rows. Loaded rows
//! are not validated; pass them to [`dq_core::normalize_rules`] before
//! evaluation.
//!
//! # Example
//!
//! ```rust
//! use dq_parser::parse_yaml;
//!
//! let yaml = r#"
//! rules:
//!   - rule_id: r1
//!     column_name: age
//!     rule_type: MIN
//!     param1: 0
//!   - rule_id: r2
//!     column_name: status
//!     rule_type: IN_LIST
//!     param1: OPEN,CLOSED
//! "#;
//!
//! let rules = parse_yaml(yaml).expect("Failed to parse rules");
//! assert_eq!(rules.len(), 2);
//! assert_eq!(rules[0].param1.as_deref(), Some("0"));
//! ```

use arrow_array::{Array, StringArray};
use arrow_csv::ReaderBuilder;
use arrow_csv::reader::Format;
use arrow_schema::{ArrowError, DataType, Field, Schema};
use dq_core::RawRule;
use serde::Deserialize;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during rule table parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV parsing failed
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] ArrowError),

    /// A CSV column could not be read as text
    #[error("Column '{0}' could not be read as text")]
    InvalidColumn(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported rule table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// Comma-separated values with a header row (.csv)
    Csv,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// A structured rule document: either a bare list or a `rules` table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    List(Vec<RawRule>),
    Table {
        #[serde(default)]
        rules: Vec<RawRule>,
    },
}

impl RuleDocument {
    fn into_rules(self) -> Vec<RawRule> {
        match self {
            RuleDocument::List(rules) | RuleDocument::Table { rules } => rules,
        }
    }
}

/// Parse a rule table from CSV text.
///
/// The first line is the header. Every column is read as text; columns that
/// are not rule table columns are ignored and empty cells are absent.
///
/// # Example
///
/// ```rust
/// use dq_parser::parse_csv;
///
/// let csv = "rule_id,column_name,rule_type,param1\nr1,age,MIN,0\n";
/// let rules = parse_csv(csv).unwrap();
/// assert_eq!(rules[0].rule_type.as_deref(), Some("MIN"));
/// ```
pub fn parse_csv(content: &str) -> Result<Vec<RawRule>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let (inferred, _) =
        Format::default()
            .with_header(true)
            .infer_schema(Cursor::new(content.as_bytes()), None)?;
    let names: Vec<String> = inferred
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    let schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .build(Cursor::new(content.as_bytes()))?;

    let mut rules = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut rows = vec![RawRule::default(); batch.num_rows()];

        for (name, column) in names.iter().zip(batch.columns()) {
            let values = column
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| ParserError::InvalidColumn(name.clone()))?;

            for (row, raw) in rows.iter_mut().enumerate() {
                let value = (!values.is_null(row))
                    .then(|| values.value(row))
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                raw.set(name, value);
            }
        }

        rules.extend(rows);
    }

    Ok(rules)
}

/// Parse a rule table from a YAML string.
///
/// Accepts a top-level list of rules or a mapping with a `rules` key.
pub fn parse_yaml(content: &str) -> Result<Vec<RawRule>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document: RuleDocument = serde_yaml_ng::from_str(content)?;
    Ok(document.into_rules())
}

/// Parse a rule table from a TOML string.
///
/// Rules are declared as an array of tables:
///
/// ```rust
/// use dq_parser::parse_toml;
///
/// let toml = r#"
/// [[rules]]
/// rule_id = "r1"
/// column_name = "age"
/// rule_type = "MAX"
/// param1 = 120
/// "#;
///
/// let rules = parse_toml(toml).unwrap();
/// assert_eq!(rules[0].param1.as_deref(), Some("120"));
/// ```
pub fn parse_toml(content: &str) -> Result<Vec<RawRule>> {
    #[derive(Deserialize)]
    struct TomlDocument {
        #[serde(default)]
        rules: Vec<RawRule>,
    }

    let document: TomlDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(document.rules)
}

/// Parse a rule table from a JSON string.
///
/// Accepts a top-level array of rules or an object with a `rules` key.
pub fn parse_json(content: &str) -> Result<Vec<RawRule>> {
    let document: RuleDocument = serde_json::from_str(content)?;
    Ok(document.into_rules())
}

/// Parse a rule table from a string in the given format.
pub fn parse_str(content: &str, format: RuleFormat) -> Result<Vec<RawRule>> {
    match format {
        RuleFormat::Csv => parse_csv(content),
        RuleFormat::Yaml => parse_yaml(content),
        RuleFormat::Toml => parse_toml(content),
        RuleFormat::Json => parse_json(content),
    }
}

/// Detect the rule table format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.csv` → `RuleFormat::Csv`
/// * `.yaml`, `.yml` → `RuleFormat::Yaml`
/// * `.toml` → `RuleFormat::Toml`
/// * `.json` → `RuleFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RuleFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "csv" => Ok(RuleFormat::Csv),
        "yaml" | "yml" => Ok(RuleFormat::Yaml),
        "toml" => Ok(RuleFormat::Toml),
        "json" => Ok(RuleFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a rule table from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use dq_parser::parse_file;
/// use std::path::Path;
///
/// let rules = parse_file(Path::new("rules/orders.csv")).unwrap();
/// println!("Loaded {} rules", rules.len());
/// ```
pub fn parse_file(path: &Path) -> Result<Vec<RawRule>> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_csv_rules() {
        let csv = "\
rule_id,column_name,rule_type,param1,param2,severity,description
r1,age,MIN,0,,high,Age must be positive
r2,status,IN_LIST,\"OPEN,CLOSED\",,,
";

        let rules = parse_csv(csv).expect("Failed to parse CSV rules");

        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[0],
            RawRule {
                rule_id: Some("r1".to_string()),
                column_name: Some("age".to_string()),
                rule_type: Some("MIN".to_string()),
                param1: Some("0".to_string()),
                param2: None,
                severity: Some("high".to_string()),
                description: Some("Age must be positive".to_string()),
            }
        );
        assert_eq!(rules[1].param1.as_deref(), Some("OPEN,CLOSED"));
        assert_eq!(rules[1].severity, None);
    }

    #[test]
    fn test_parse_csv_subset_and_unknown_columns() {
        let csv = "column_name,rule_type,owner\ncity,not_null,ops\n";
        let rules = parse_csv(csv).unwrap();

        assert_eq!(
            rules,
            vec![RawRule {
                column_name: Some("city".to_string()),
                rule_type: Some("not_null".to_string()),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_parse_csv_keeps_numeric_text() {
        let csv = "rule_id,column_name,rule_type,param1\n1,price,MAX,99.50\n";
        let rules = parse_csv(csv).unwrap();

        assert_eq!(rules[0].rule_id.as_deref(), Some("1"));
        assert_eq!(rules[0].param1.as_deref(), Some("99.50"));
    }

    #[test]
    fn test_parse_empty_csv() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("rule_id,column_name\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_yaml_list() {
        let yaml = r#"
- rule_id: r1
  column_name: email
  rule_type: regex
  param1: "^[^@]+@[^@]+$"
- rule_id: 2
  column_name: qty
  rule_type: max
  param1: 10.5
  severity: ~
"#;

        let rules = parse_yaml(yaml).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].param1.as_deref(), Some("^[^@]+@[^@]+$"));
        assert_eq!(rules[1].rule_id.as_deref(), Some("2"));
        assert_eq!(rules[1].param1.as_deref(), Some("10.5"));
        assert_eq!(rules[1].severity, None);
    }

    #[test]
    fn test_parse_yaml_invalid() {
        let result = parse_yaml("rules: [unclosed");
        assert!(matches!(result, Err(ParserError::YamlError(_))));
    }

    #[test]
    fn test_parse_toml_rules() {
        let toml = r#"
[[rules]]
rule_id = "r1"
column_name = "city"
rule_type = "NOT_NULL"
param1 = "UNKNOWN"

[[rules]]
rule_id = "r2"
column_name = "age"
rule_type = "MIN"
param1 = 0
"#;

        let rules = parse_toml(toml).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].param1.as_deref(), Some("0"));
    }

    #[test]
    fn test_parse_toml_invalid() {
        let result = parse_toml("[[rules]\nrule_id = ");
        assert!(matches!(result, Err(ParserError::TomlError(_))));
    }

    #[test]
    fn test_parse_json_both_shapes() {
        let list = r#"[{"rule_id": "r1", "column_name": "a", "rule_type": "NOT_NULL"}]"#;
        let table = r#"{"rules": [{"rule_id": "r1", "column_name": "a", "rule_type": "NOT_NULL"}]}"#;

        assert_eq!(parse_json(list).unwrap(), parse_json(table).unwrap());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("r.csv")).unwrap(), RuleFormat::Csv);
        assert_eq!(detect_format(Path::new("r.YML")).unwrap(), RuleFormat::Yaml);
        assert_eq!(detect_format(Path::new("r.yaml")).unwrap(), RuleFormat::Yaml);
        assert_eq!(detect_format(Path::new("r.toml")).unwrap(), RuleFormat::Toml);
        assert_eq!(detect_format(Path::new("r.json")).unwrap(), RuleFormat::Json);
        assert!(matches!(
            detect_format(Path::new("r.xlsx")),
            Err(ParserError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
        assert!(matches!(
            detect_format(Path::new("rules")),
            Err(ParserError::InvalidExtension)
        ));
    }

    #[test]
    fn test_parse_file_detects_format() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("rules.csv");
        std::fs::write(
            &csv_path,
            "rule_id,column_name,rule_type,param1\ncity_nn,city,NOT_NULL,N/A\n",
        )
        .unwrap();

        let yaml_path = dir.path().join("rules.yaml");
        std::fs::write(
            &yaml_path,
            "rules:\n  - rule_id: city_nn\n    column_name: city\n    rule_type: NOT_NULL\n    param1: N/A\n",
        )
        .unwrap();

        let from_csv = parse_file(&csv_path).unwrap();
        assert_eq!(
            from_csv,
            vec![RawRule {
                rule_id: Some("city_nn".to_string()),
                column_name: Some("city".to_string()),
                rule_type: Some("NOT_NULL".to_string()),
                param1: Some("N/A".to_string()),
                ..Default::default()
            }]
        );
        assert_eq!(parse_file(&yaml_path).unwrap(), from_csv);
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let xlsx_path = dir.path().join("rules.xlsx");
        std::fs::write(&xlsx_path, "rule_id\n").unwrap();
        assert!(matches!(
            parse_file(&xlsx_path),
            Err(ParserError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            parse_file(&dir.path().join("missing.csv")),
            Err(ParserError::IoError(_))
        ));
    }
}
