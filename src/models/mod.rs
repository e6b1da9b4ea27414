//! Models module for the SDK
//!
//! Defines the three-level catalog hierarchy (dictionary, structures,
//! elements) and the notes parser that derives valuesets from element notes.

pub mod catalog;
pub mod dictionary;
pub mod element;
mod fields;
pub mod notes;
pub mod structure;

pub use catalog::{Catalog, FetchReport};
pub use dictionary::DataDictionary;
pub use element::DataElement;
pub use fields::Record;
pub use notes::{NotesMode, ParsedNotes, ValueCode, parse_notes, parse_notes_with};
pub use structure::{DataStructure, ElementState};
