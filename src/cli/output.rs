//! Output formatting for CLI

use std::fmt;
use std::io::Write;

use serde_json::Value;

use super::error::CliError;

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON document per line
    #[default]
    Json,
    /// YAML documents separated by `---`
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render one document in the given format
pub fn format_document(document: &Value, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string(document)
            .map_err(|e| CliError::OutputError(format!("Failed to render JSON: {}", e))),
        OutputFormat::Yaml => {
            let body = serde_yaml::to_string(document)
                .map_err(|e| CliError::OutputError(format!("Failed to render YAML: {}", e)))?;
            Ok(format!("---\n{}", body.trim_end()))
        }
    }
}

/// Write one document followed by a newline
pub fn write_document<W: Write>(
    out: &mut W,
    document: &Value,
    format: OutputFormat,
) -> Result<(), CliError> {
    let rendered = format_document(document, format)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_is_single_line() {
        let doc = json!({"shortName": "demof01", "dataElements": [{"name": "x"}]});
        let rendered = format_document(&doc, OutputFormat::Json).unwrap();
        assert!(!rendered.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(&rendered).unwrap(), doc);
    }

    #[test]
    fn test_yaml_has_document_marker() {
        let rendered = format_document(&json!({"name": "RDoC"}), OutputFormat::Yaml).unwrap();
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("name: RDoC"));
    }

    #[test]
    fn test_write_document_appends_newline() {
        let mut out = Vec::new();
        write_document(&mut out, &json!({"a": 1}), OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n");
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }
}
