//! Notes field parsing
//!
//! Data element notes often carry a controlled vocabulary written as
//! `code=label` pairs separated by `;`, mixed with free text. [`parse_notes`]
//! turns that text into a [`ValueCode`] list plus whatever notes text remains.

use serde::{Deserialize, Serialize};

/// Segment delimiter inside a notes field
const SEGMENT_DELIMITER: char = ';';

/// Separator between a code and its label
const CODE_SEPARATOR: char = '=';

/// Notes text the catalog uses for "no notes"
const NULL_SENTINEL: &str = "null";

/// One `code=label` entry of a valueset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueCode {
    pub code: String,
    pub label: String,
}

impl ValueCode {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// How uncoded segments interact with coded ones
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotesMode {
    /// Each segment overwrites the cleaned text in turn: a coded segment blanks
    /// it, an uncoded one replaces it with that segment. The last segment wins.
    #[default]
    LastSegmentWins,
    /// Any coded segment blanks the notes. Without codes the raw text is kept whole.
    CodedWins,
}

/// Result of parsing a notes field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNotes {
    /// Notes text left after extracting codes
    pub cleaned: String,
    /// Extracted codes in source order
    pub valueset: Vec<ValueCode>,
}

/// Parse a notes field with the default [`NotesMode::LastSegmentWins`] rules
///
/// ```
/// use data_dictionary_sdk::models::notes::{parse_notes, ValueCode};
///
/// let parsed = parse_notes("1=Yes;2=No");
/// assert_eq!(parsed.cleaned, "");
/// assert_eq!(parsed.valueset, vec![ValueCode::new("1", "Yes"), ValueCode::new("2", "No")]);
/// ```
pub fn parse_notes(raw: &str) -> ParsedNotes {
    parse_notes_with(raw, NotesMode::LastSegmentWins)
}

/// Parse a notes field
///
/// Segments are split on `;` and each segment on its first `=`, so labels
/// may themselves contain `=`. Codes and labels are trimmed; uncoded segments
/// are kept verbatim.
pub fn parse_notes_with(raw: &str, mode: NotesMode) -> ParsedNotes {
    if raw.is_empty() {
        return ParsedNotes {
            cleaned: raw.to_string(),
            valueset: Vec::new(),
        };
    }

    let mut cleaned = raw.to_string();
    let mut valueset = Vec::new();

    for segment in raw.split(SEGMENT_DELIMITER) {
        match segment.split_once(CODE_SEPARATOR) {
            Some((code, label)) => {
                valueset.push(ValueCode::new(code.trim(), label.trim()));
                if raw != NULL_SENTINEL {
                    cleaned.clear();
                }
            }
            None => {
                if mode == NotesMode::LastSegmentWins {
                    cleaned = segment.to_string();
                }
            }
        }
    }

    ParsedNotes { cleaned, valueset }
}
