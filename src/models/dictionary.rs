//! Data dictionary model
//!
//! The root of the catalog hierarchy. A dictionary is built from one fetch of
//! its base URL; its structure catalog is filled by [`DataDictionary::fetch_structures`]
//! and each structure's elements by [`DataStructure::fetch_elements`] or
//! [`DataDictionary::expand`].
//!
//! # Example
//!
//! ```ignore
//! use data_dictionary_sdk::{ClientConfig, DataDictionary, HttpTransport};
//!
//! let config = ClientConfig::default();
//! let transport = HttpTransport::from_config(&config)?;
//!
//! let mut dictionary = DataDictionary::connect_with(&transport, &config).await?;
//! dictionary.fetch_structures(&transport).await?;
//!
//! let structure = dictionary.lookup_mut("demof01")?;
//! structure.fetch_elements(&transport).await?;
//! ```

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use super::catalog::{Catalog, FetchReport};
use super::fields::{self, Record};
use super::notes::NotesMode;
use super::structure::DataStructure;
use crate::config::ClientConfig;
use crate::error::{DictionaryError, DictionaryResult};
use crate::transport::{self, Transport};

/// Root entity of a data dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct DataDictionary {
    base_url: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Operations advertised by the service, passed through untouched
    pub operations: Option<Vec<Value>>,
    notes_mode: NotesMode,
    raw: Record,
    structures: Catalog<DataStructure>,
}

impl DataDictionary {
    /// Fetch the dictionary root document at `base_url`
    pub async fn connect(
        transport: &dyn Transport,
        base_url: impl Into<String>,
    ) -> DictionaryResult<Self> {
        let base_url = base_url.into();
        let document = transport.get_json(&base_url).await?;
        Self::from_document(base_url, document, NotesMode::default())
    }

    /// Fetch the dictionary root document described by `config`
    pub async fn connect_with(
        transport: &dyn Transport,
        config: &ClientConfig,
    ) -> DictionaryResult<Self> {
        config.validate()?;
        let base_url = config.normalized_base_url().to_string();
        let document = transport.get_json(&base_url).await?;
        Self::from_document(base_url, document, config.notes_mode)
    }

    /// Build a dictionary from an already fetched root document
    pub fn from_document(
        base_url: impl Into<String>,
        document: Value,
        notes_mode: NotesMode,
    ) -> DictionaryResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let record = match document {
            Value::Object(record) => record,
            other => {
                return Err(DictionaryError::unexpected_shape(&base_url, "an object", &other));
            }
        };

        let operations = match record.get("operations") {
            Some(Value::Array(ops)) => Some(ops.clone()),
            _ => None,
        };

        let dictionary = Self {
            name: fields::opt_string(&record, "name"),
            version: fields::opt_string(&record, "version"),
            description: fields::opt_string(&record, "description"),
            operations,
            base_url,
            notes_mode,
            raw: record,
            structures: Catalog::new(),
        };

        info!(
            url = %dictionary.base_url,
            name = dictionary.name.as_deref().unwrap_or("<unnamed>"),
            version = dictionary.version.as_deref().unwrap_or("<unknown>"),
            "Connected to data dictionary"
        );

        Ok(dictionary)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn notes_mode(&self) -> NotesMode {
        self.notes_mode
    }

    /// The root document this dictionary was built from
    pub fn raw(&self) -> &Record {
        &self.raw
    }

    /// Load the structure catalog
    ///
    /// Performs one `GET {base_url}/datastructure` and replaces the catalog
    /// wholesale. Element documents are not fetched. Records without a
    /// `shortName` are skipped and reported in the returned [`FetchReport`].
    pub async fn fetch_structures(
        &mut self,
        transport: &dyn Transport,
    ) -> DictionaryResult<FetchReport> {
        let url = transport::structures_url(&self.base_url);
        let entries = match transport.get_json(&url).await? {
            Value::Array(entries) => entries,
            other => return Err(DictionaryError::unexpected_shape(&url, "an array", &other)),
        };

        let mut catalog = Catalog::new();
        let mut report = FetchReport::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let structure = match entry {
                Value::Object(record) => {
                    DataStructure::from_record(record, self.base_url.as_str(), self.notes_mode)
                }
                _ => None,
            };
            let Some(structure) = structure else {
                let err = DictionaryError::Schema {
                    endpoint: url.clone(),
                    index,
                    field: "shortName",
                };
                warn!("Skipping data structure: {}", err);
                report.skipped.push(err);
                continue;
            };

            let short_name = structure.short_name().to_string();
            if catalog.insert(short_name.clone(), structure).is_some() {
                warn!(short_name = %short_name, "Duplicate short name, keeping the later record");
            }
        }

        report.loaded = catalog.len();
        info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Fetched data structures"
        );

        self.structures = catalog;
        Ok(report)
    }

    /// Look up a structure by short name
    ///
    /// Never fetches; an unfetched catalog is empty.
    pub fn lookup(&self, short_name: &str) -> DictionaryResult<&DataStructure> {
        self.structures
            .get(short_name)
            .ok_or_else(|| DictionaryError::NotFound(short_name.to_string()))
    }

    /// Look up a structure by short name for element fetching
    pub fn lookup_mut(&mut self, short_name: &str) -> DictionaryResult<&mut DataStructure> {
        self.structures
            .get_mut(short_name)
            .ok_or_else(|| DictionaryError::NotFound(short_name.to_string()))
    }

    pub fn structures(&self) -> &Catalog<DataStructure> {
        &self.structures
    }

    /// Short names in response order
    pub fn structure_names(&self) -> Vec<&str> {
        self.structures.keys().collect()
    }

    /// Fetch the elements of several structures concurrently
    ///
    /// Each named structure is fetched at most once, all requests in flight
    /// together. Results come back in the order of `names`; unknown names
    /// yield [`DictionaryError::NotFound`] without a request. A failure for
    /// one name leaves the others unaffected.
    pub async fn expand<S: AsRef<str>>(
        &mut self,
        transport: &dyn Transport,
        names: &[S],
    ) -> Vec<(String, DictionaryResult<FetchReport>)> {
        let wanted: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();

        let fetches = self
            .structures
            .values_mut()
            .filter(|structure| wanted.contains(structure.short_name()))
            .map(|structure| async move {
                let result = structure.fetch_elements(transport).await;
                (structure.short_name().to_string(), result)
            });

        let results: HashMap<String, DictionaryResult<FetchReport>> =
            join_all(fetches).await.into_iter().collect();

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let result = results
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| Err(DictionaryError::NotFound(name.to_string())));
                (name.to_string(), result)
            })
            .collect()
    }

    /// Root metadata as JSON, with the number of loaded structures
    pub fn summary_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "version": self.version,
            "description": self.description,
            "operations": self.operations,
            "baseUrl": self.base_url,
            "structures": self.structures.len(),
        })
    }
}
