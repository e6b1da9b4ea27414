//! Data structure model

use serde_json::Value;
use tracing::{info, warn};

use super::catalog::{Catalog, FetchReport};
use super::element::DataElement;
use super::fields::{self, Record};
use super::notes::NotesMode;
use crate::error::{DictionaryError, DictionaryResult};
use crate::transport::{self, Transport};

/// Element catalog lifecycle of a data structure
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ElementState {
    /// Elements have not been requested yet
    #[default]
    Unfetched,
    /// Elements loaded by the most recent fetch, in response order
    Fetched(Catalog<DataElement>),
}

/// One record type of a data dictionary
///
/// Built from an entry of the structure catalog. Elements are loaded only by
/// an explicit [`DataStructure::fetch_elements`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStructure {
    short_name: String,
    pub category: Option<String>,
    pub data_type: Option<String>,
    /// External reference URL (`ndarURL`)
    pub source_url: Option<String>,
    pub publish_date: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub title: Option<String>,
    dictionary_url: String,
    notes_mode: NotesMode,
    raw: Record,
    elements: ElementState,
}

impl DataStructure {
    /// Build a structure from one structure-catalog record
    ///
    /// Returns `None` when the record has no `shortName`.
    pub fn from_record(
        record: Record,
        dictionary_url: impl Into<String>,
        notes_mode: NotesMode,
    ) -> Option<Self> {
        let short_name = fields::identity(&record, "shortName")?;

        Some(Self {
            short_name,
            category: fields::opt_string(&record, "category"),
            data_type: fields::opt_string(&record, "dataType"),
            source_url: fields::opt_string(&record, "ndarURL"),
            publish_date: fields::opt_string(&record, "publishDate"),
            source: fields::opt_string(&record, "source"),
            status: fields::opt_string(&record, "status"),
            title: fields::opt_string(&record, "title"),
            dictionary_url: dictionary_url.into().trim_end_matches('/').to_string(),
            notes_mode,
            raw: record,
            elements: ElementState::Unfetched,
        })
    }

    /// Identity key within the dictionary
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Base URL of the dictionary this structure belongs to
    pub fn dictionary_url(&self) -> &str {
        &self.dictionary_url
    }

    /// URL of this structure's element document
    pub fn elements_url(&self) -> DictionaryResult<String> {
        transport::structure_url(&self.dictionary_url, &self.short_name)
    }

    /// The payload this structure was built from, merged with the element document once fetched
    pub fn raw(&self) -> &Record {
        &self.raw
    }

    pub fn element_state(&self) -> &ElementState {
        &self.elements
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self.elements, ElementState::Fetched(_))
    }

    /// Elements in response order; `None` until fetched
    pub fn elements(&self) -> Option<&Catalog<DataElement>> {
        match &self.elements {
            ElementState::Fetched(catalog) => Some(catalog),
            ElementState::Unfetched => None,
        }
    }

    /// Look up one element by name; `None` if unknown or not fetched yet
    pub fn element(&self, name: &str) -> Option<&DataElement> {
        self.elements().and_then(|catalog| catalog.get(name))
    }

    /// Load this structure's elements
    ///
    /// Performs one `GET {dictionary_url}/datastructure/{short_name}` and
    /// replaces any previously loaded elements. Records without a `name` are
    /// skipped and reported in the returned [`FetchReport`]. Top-level fields
    /// of the document other than `shortName` are merged into the raw payload.
    /// On error the previous element state is left untouched.
    pub async fn fetch_elements(
        &mut self,
        transport: &dyn Transport,
    ) -> DictionaryResult<FetchReport> {
        let url = self.elements_url()?;
        let document = transport.get_json(&url).await?;

        let mut document = match document {
            Value::Object(document) => document,
            other => return Err(DictionaryError::unexpected_shape(&url, "an object", &other)),
        };

        let entries = match document.remove("dataElements") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(DictionaryError::unexpected_shape(
                    &url,
                    "a dataElements array",
                    &other,
                ));
            }
            None => {
                return Err(DictionaryError::Parse {
                    url,
                    message: "missing dataElements array".to_string(),
                });
            }
        };

        let mut catalog = Catalog::new();
        let mut report = FetchReport::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let element = match entry {
                Value::Object(record) => DataElement::from_record(record, self.notes_mode),
                _ => None,
            };
            let Some(element) = element else {
                let err = DictionaryError::Schema {
                    endpoint: url.clone(),
                    index,
                    field: "name",
                };
                warn!(structure = %self.short_name, "Skipping element: {}", err);
                report.skipped.push(err);
                continue;
            };

            let name = element.name.clone();
            if catalog.insert(name.clone(), element).is_some() {
                warn!(
                    structure = %self.short_name,
                    element = %name,
                    "Duplicate element name, keeping the later record"
                );
            }
        }

        report.loaded = catalog.len();
        info!(
            structure = %self.short_name,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Fetched data elements"
        );

        for (key, value) in document {
            if key == "shortName" {
                if value.as_str() != Some(self.short_name.as_str()) {
                    warn!(
                        structure = %self.short_name,
                        reported = %value,
                        "Ignoring mismatched shortName"
                    );
                }
                continue;
            }
            self.raw.insert(key, value);
        }
        self.elements = ElementState::Fetched(catalog);

        Ok(report)
    }

    /// JSON payload of this structure, with elements embedded under `dataElements` once fetched
    pub fn to_json(&self) -> Value {
        let mut record = self.raw.clone();
        if let Some(catalog) = self.elements() {
            record.insert(
                "dataElements".to_string(),
                Value::Array(catalog.values().map(DataElement::to_json).collect()),
            );
        }
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FixtureTransport;
    use serde_json::json;

    const BASE: &str = "http://dd.test/api";

    fn structure(value: Value) -> DataStructure {
        let record = value.as_object().cloned().unwrap();
        DataStructure::from_record(record, BASE, NotesMode::default()).unwrap()
    }

    #[test]
    fn test_structure_fields() {
        let ds = structure(json!({
            "shortName": "demof01",
            "category": "Demographics",
            "dataType": "Clinical Assessments",
            "ndarURL": "https://nda.nih.gov/data_structure.html?short_name=demof01",
            "publishDate": "2015-06-01",
            "source": "NDA",
            "status": "Published",
            "title": "Demographics"
        }));

        assert_eq!(ds.short_name(), "demof01");
        assert_eq!(ds.category.as_deref(), Some("Demographics"));
        assert_eq!(ds.data_type.as_deref(), Some("Clinical Assessments"));
        assert!(ds.source_url.as_deref().unwrap().ends_with("demof01"));
        assert_eq!(ds.status.as_deref(), Some("Published"));
        assert_eq!(ds.elements_url().unwrap(), format!("{BASE}/datastructure/demof01"));
        assert!(!ds.is_fetched());
        assert!(ds.elements().is_none());
    }

    #[test]
    fn test_structure_requires_short_name() {
        let record = json!({"category": "c"}).as_object().cloned().unwrap();
        assert!(DataStructure::from_record(record, BASE, NotesMode::default()).is_none());
    }

    #[tokio::test]
    async fn test_fetch_elements() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let transport = FixtureTransport::new().with_response(
            format!("{BASE}/datastructure/demof01"),
            json!({
                "shortName": "demof01",
                "dataElements": [
                    {"name": "subjectkey", "position": 1},
                    {"name": "x", "notes": "1=Yes;2=No", "position": 2}
                ]
            }),
        );

        let report = ds.fetch_elements(&transport).await.unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
        assert!(ds.is_fetched());

        let names: Vec<_> = ds.elements().unwrap().keys().collect();
        assert_eq!(names, vec!["subjectkey", "x"]);
        assert_eq!(ds.element("x").unwrap().valueset.len(), 2);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_elements_skips_unnamed_records() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let url = format!("{BASE}/datastructure/demof01");
        let transport = FixtureTransport::new().with_response(
            url.clone(),
            json!({"dataElements": [{"name": "a"}, {"type": "String"}, {"name": "b"}]}),
        );

        let report = ds.fetch_elements(&transport).await.unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(
            report.skipped,
            vec![DictionaryError::Schema {
                endpoint: url,
                index: 1,
                field: "name"
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_elements_replaces_previous_catalog() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let url = format!("{BASE}/datastructure/demof01");
        let mut transport = FixtureTransport::new().with_response(
            url.clone(),
            json!({"dataElements": [{"name": "a"}, {"name": "b"}]}),
        );

        ds.fetch_elements(&transport).await.unwrap();
        transport.set_response(url, json!({"dataElements": [{"name": "c"}]}));
        ds.fetch_elements(&transport).await.unwrap();

        let names: Vec<_> = ds.elements().unwrap().keys().collect();
        assert_eq!(names, vec!["c"]);
    }

    #[tokio::test]
    async fn test_fetch_elements_shape_errors() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let url = format!("{BASE}/datastructure/demof01");

        let transport = FixtureTransport::new().with_response(url.clone(), json!([]));
        let err = ds.fetch_elements(&transport).await.unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));

        let transport =
            FixtureTransport::new().with_response(url.clone(), json!({"shortName": "demof01"}));
        let err = ds.fetch_elements(&transport).await.unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));

        let transport =
            FixtureTransport::new().with_response(url, json!({"dataElements": "none"}));
        let err = ds.fetch_elements(&transport).await.unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));

        assert!(!ds.is_fetched());
    }

    #[tokio::test]
    async fn test_fetch_elements_transport_error_keeps_state() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let transport = FixtureTransport::new();

        let err = ds.fetch_elements(&transport).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(ds.element_state(), &ElementState::Unfetched);
    }

    #[tokio::test]
    async fn test_structure_to_json_embeds_elements() {
        let mut ds = structure(json!({"shortName": "demof01", "title": "Demo"}));
        assert!(ds.to_json().get("dataElements").is_none());

        let transport = FixtureTransport::new().with_response(
            format!("{BASE}/datastructure/demof01"),
            json!({
                "shortName": "demof01",
                "publishDate": "2020-01-01",
                "dataElements": [{"name": "x", "notes": "1=Yes"}]
            }),
        );
        ds.fetch_elements(&transport).await.unwrap();

        let doc = ds.to_json();
        assert_eq!(doc["title"], "Demo");
        assert_eq!(doc["publishDate"], "2020-01-01");
        assert_eq!(doc["dataElements"][0]["name"], "x");
        assert_eq!(doc["dataElements"][0]["valueset"][0]["label"], "Yes");
    }

    #[tokio::test]
    async fn test_fetch_elements_keeps_identity_key() {
        let mut ds = structure(json!({"shortName": "demof01"}));
        let transport = FixtureTransport::new().with_response(
            format!("{BASE}/datastructure/demof01"),
            json!({"shortName": "other", "title": "Demo", "dataElements": []}),
        );

        ds.fetch_elements(&transport).await.unwrap();

        assert_eq!(ds.short_name(), "demof01");
        assert_eq!(ds.raw()["shortName"], "demof01");
        let doc = ds.to_json();
        assert_eq!(doc["shortName"], "demof01");
        assert_eq!(doc["title"], "Demo");
    }
}
