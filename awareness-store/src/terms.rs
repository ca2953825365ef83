//! Search-term list loaders.
//!
//! A term file yields an ordered list of trimmed, non-empty terms. The
//! format is chosen from the file extension:
//!
//! | extension | shape |
//! |-----------|-------|
//! | `.txt` | one term per line |
//! | `.csv` | first column of every row |
//! | `.json` | array of terms, or object with a `terms` array |
//! | `.yaml` / `.yml` | same two shapes as JSON |

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::TermsError;

/// Supported term-list formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsFormat {
    /// Plain text, one term per line.
    Text,
    /// Comma-separated values, first column.
    Csv,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl TermsFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, TermsError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(TermsError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Loads the terms stored in `path`.
pub async fn load_terms(path: &Path) -> Result<Vec<String>, TermsError> {
    let format = TermsFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TermsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let terms = parse_terms(format, &content).map_err(|reason| TermsError::InvalidFormat {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(path = %path.display(), ?format, count = terms.len(), "Loaded search terms");
    Ok(terms)
}

/// Parses term-list content already read from disk.
///
/// The error is a human-readable reason, wrapped by [`load_terms`].
pub fn parse_terms(format: TermsFormat, content: &str) -> Result<Vec<String>, String> {
    match format {
        TermsFormat::Text => Ok(clean(content.lines())),
        TermsFormat::Csv => Ok(clean(first_csv_column(content))),
        TermsFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| format!("malformed JSON: {e}"))?;
            let document = TermsDocument::deserialize(value).map_err(|_| SHAPE_ERROR.to_string())?;
            Ok(document.into_terms())
        }
        TermsFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| format!("malformed YAML: {e}"))?;
            let document = TermsDocument::deserialize(value).map_err(|_| SHAPE_ERROR.to_string())?;
            Ok(document.into_terms())
        }
    }
}

const SHAPE_ERROR: &str = "expected an array of terms or an object with a 'terms' array";

/// Accepted document shapes for JSON and YAML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TermsDocument {
    List(Vec<TermValue>),
    Object { terms: Vec<TermValue> },
}

impl TermsDocument {
    fn into_terms(self) -> Vec<String> {
        let values = match self {
            Self::List(values) | Self::Object { terms: values } => values,
        };
        clean(values.iter().map(ToString::to_string))
    }
}

/// A scalar term; numbers and booleans are kept as their text form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TermValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn clean<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extracts the first field of every CSV record.
///
/// Handles quoted fields, doubled quotes, and quoted line breaks.
fn first_csv_column(content: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut in_first_field = true;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    if in_first_field {
                        field.push('"');
                    }
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => in_first_field = false,
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                in_first_field = true;
            }
            '\r' if !in_quotes => {}
            _ => {
                if in_first_field {
                    field.push(c);
                }
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_txt() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "terms.txt", "  rust web framework \n\nasync runtime\n   \n").await;
        let terms = load_terms(&path).await.unwrap();
        assert_eq!(terms, vec!["rust web framework", "async runtime"]);
    }

    #[tokio::test]
    async fn test_load_csv_first_column() {
        let dir = TempDir::new().unwrap();
        let content = "term,priority\r\n\"web, framework\",1\n\"say \"\"hi\"\"\",2\n,3\nplain\n";
        let path = write(&dir, "terms.CSV", content).await;
        let terms = load_terms(&path).await.unwrap();
        assert_eq!(terms, vec!["term", "web, framework", "say \"hi\"", "plain"]);
    }

    #[tokio::test]
    async fn test_load_json_array_and_object() {
        let dir = TempDir::new().unwrap();
        let array = write(&dir, "a.json", r#"["one", " two ", "", 3]"#).await;
        assert_eq!(load_terms(&array).await.unwrap(), vec!["one", "two", "3"]);

        let object = write(&dir, "b.json", r#"{"terms": ["alpha", "beta"], "note": "x"}"#).await;
        assert_eq!(load_terms(&object).await.unwrap(), vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_load_yaml_both_shapes() {
        let dir = TempDir::new().unwrap();
        let list = write(&dir, "a.yaml", "- first term\n- second term\n").await;
        assert_eq!(load_terms(&list).await.unwrap(), vec!["first term", "second term"]);

        let object = write(&dir, "b.yml", "terms:\n  - gamma\n  - delta\n").await;
        assert_eq!(load_terms(&object).await.unwrap(), vec!["gamma", "delta"]);
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "terms.xml", "<terms/>").await;
        let err = load_terms(&path).await.unwrap_err();
        assert!(matches!(err, TermsError::UnsupportedFormat { ref extension, .. } if extension == "xml"));
    }

    #[tokio::test]
    async fn test_malformed_json_keeps_parser_message() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "terms.json", r#"["unterminated"#).await;
        let err = load_terms(&path).await.unwrap_err();
        assert!(matches!(err, TermsError::InvalidFormat { .. }));
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_invalid() {
        let dir = TempDir::new().unwrap();
        let json = write(&dir, "terms.json", r#"{"queries": ["x"]}"#).await;
        assert!(matches!(
            load_terms(&json).await.unwrap_err(),
            TermsError::InvalidFormat { .. }
        ));

        let yaml = write(&dir, "terms.yaml", "just a string\n").await;
        assert!(matches!(
            load_terms(&yaml).await.unwrap_err(),
            TermsError::InvalidFormat { .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_terms(&dir.path().join("absent.txt")).await.unwrap_err();
        assert!(matches!(err, TermsError::Io { .. }));
    }
}
