//! Data element model

use serde_json::Value;

use super::fields::{self, Record};
use super::notes::{NotesMode, ValueCode, parse_notes_with};

/// One field definition within a data structure
///
/// Every optional attribute is `None` (or empty) when the catalog omits it.
/// The notes field is parsed on construction: `notes` holds the cleaned
/// text and `valueset` the extracted `code=label` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement {
    /// Element name, unique within its structure
    pub name: String,
    /// Whether a value is required; `None` when unknown
    pub required: Option<bool>,
    /// Alternate names, in catalog order
    pub aliases: Vec<String>,
    /// Ordinal position within the structure
    pub position: Option<i64>,
    /// Declared type (e.g. "Integer", "String", "Date")
    pub element_type: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    /// Value range descriptor, passed through untouched
    pub value_range: Option<Value>,
    /// Notes text left after valueset extraction
    pub notes: Option<String>,
    /// Controlled vocabulary parsed from the notes
    pub valueset: Vec<ValueCode>,
    raw: Record,
}

impl DataElement {
    /// Build an element from one `dataElements` record
    ///
    /// Returns `None` when the record has no `name`.
    pub fn from_record(record: Record, mode: NotesMode) -> Option<Self> {
        let name = fields::identity(&record, "name")?;

        let (notes, valueset) = match fields::opt_string(&record, "notes") {
            Some(raw) => {
                let parsed = parse_notes_with(&raw, mode);
                (Some(parsed.cleaned), parsed.valueset)
            }
            None => (None, Vec::new()),
        };

        Some(Self {
            name,
            required: fields::opt_bool(&record, "required"),
            aliases: fields::string_list(&record, "aliases"),
            position: fields::opt_i64(&record, "position"),
            element_type: fields::opt_string(&record, "type"),
            description: fields::opt_string(&record, "description"),
            title: fields::opt_string(&record, "title"),
            value_range: fields::opt_value(&record, "valueRange"),
            notes,
            valueset,
            raw: record,
        })
    }

    /// Build an element from a JSON value, `None` unless it is an object with a name
    pub fn from_json(value: &Value, mode: NotesMode) -> Option<Self> {
        value
            .as_object()
            .and_then(|record| Self::from_record(record.clone(), mode))
    }

    /// The record this element was built from
    pub fn raw(&self) -> &Record {
        &self.raw
    }

    /// Check if the notes carried a controlled vocabulary
    pub fn has_valueset(&self) -> bool {
        !self.valueset.is_empty()
    }

    /// Look up the label for a code
    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.valueset
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label.as_str())
    }

    /// The original record with the cleaned `notes` and derived `valueset` written back
    pub fn to_json(&self) -> Value {
        let mut record = self.raw.clone();
        if let Some(notes) = &self.notes {
            record.insert("notes".to_string(), Value::String(notes.clone()));
        }
        record.insert(
            "valueset".to_string(),
            serde_json::to_value(&self.valueset).unwrap_or(Value::Array(Vec::new())),
        );
        Value::Object(record)
    }
}
