//! Dictionary summary and structure listing

use std::io::Write;

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, write_document};
use crate::models::DataDictionary;

/// Handle the default command: print the dictionary root metadata
pub fn handle_summary<W: Write>(
    dictionary: &DataDictionary,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    write_document(out, &dictionary.summary_json(), format)
}

/// Handle `--list`: print every structure of the fetched catalog, one document each
pub fn handle_list<W: Write>(
    dictionary: &DataDictionary,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    for structure in dictionary.structures().values() {
        write_document(out, &structure.to_json(), format)?;
    }
    Ok(())
}
