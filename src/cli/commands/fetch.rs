//! Fetch data structures with their elements

use std::io::Write;

use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, write_document};
use crate::models::DataDictionary;
use crate::transport::Transport;

/// Arguments for fetching data structures by short name
pub struct FetchArgs {
    /// Short names to fetch, in output order
    pub names: Vec<String>,
    /// Output format
    pub format: OutputFormat,
}

/// Handle a fetch of one or more data structures
///
/// The structure catalog must already be loaded. Element documents are
/// fetched concurrently; each structure is then printed in the order
/// requested. A failure for one name is reported on `errors` and does not
/// stop the others.
pub async fn handle_fetch<W: Write, E: Write>(
    dictionary: &mut DataDictionary,
    transport: &dyn Transport,
    args: &FetchArgs,
    out: &mut W,
    errors: &mut E,
) -> Result<(), CliError> {
    let results = dictionary.expand(transport, args.names.as_slice()).await;
    let mut failed = 0;

    for (name, result) in results {
        match result {
            Ok(report) => {
                for skipped in &report.skipped {
                    writeln!(errors, "Warning: {}", skipped)?;
                }
                let structure = dictionary.lookup(&name)?;
                write_document(out, &structure.to_json(), args.format)?;
            }
            Err(err) => {
                failed += 1;
                writeln!(errors, "Error fetching '{}': {}", name, err.user_message())?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::PartialFailure {
            failed,
            requested: args.names.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FixtureTransport;
    use serde_json::{Value, json};

    const BASE: &str = "http://dd.test/api";

    async fn dictionary(transport: &FixtureTransport) -> DataDictionary {
        let mut dictionary = DataDictionary::connect(transport, BASE).await.unwrap();
        dictionary.fetch_structures(transport).await.unwrap();
        dictionary
    }

    fn fixture() -> FixtureTransport {
        FixtureTransport::new()
            .with_response(BASE, json!({"name": "RDoC"}))
            .with_response(
                format!("{BASE}/datastructure"),
                json!([{"shortName": "demof01", "category": "c"}, {"shortName": "panas01"}]),
            )
            .with_response(
                format!("{BASE}/datastructure/demof01"),
                json!({"dataElements": [{"name": "x", "notes": "1=Yes;2=No"}]}),
            )
    }

    #[tokio::test]
    async fn test_handle_fetch_prints_expanded_structure() {
        let transport = fixture();
        let mut dd = dictionary(&transport).await;
        let args = FetchArgs {
            names: vec!["demof01".to_string()],
            format: OutputFormat::Json,
        };

        let (mut out, mut errors) = (Vec::new(), Vec::new());
        handle_fetch(&mut dd, &transport, &args, &mut out, &mut errors)
            .await
            .unwrap();

        let doc: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["shortName"], "demof01");
        assert_eq!(doc["category"], "c");
        assert_eq!(doc["dataElements"][0]["notes"], "");
        assert_eq!(
            doc["dataElements"][0]["valueset"],
            json!([{"code": "1", "label": "Yes"}, {"code": "2", "label": "No"}])
        );
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_handle_fetch_continues_after_failure() {
        let transport = fixture();
        let mut dd = dictionary(&transport).await;
        let args = FetchArgs {
            names: vec![
                "unknown01".to_string(),
                "panas01".to_string(),
                "demof01".to_string(),
            ],
            format: OutputFormat::Json,
        };

        let (mut out, mut errors) = (Vec::new(), Vec::new());
        let err = handle_fetch(&mut dd, &transport, &args, &mut out, &mut errors)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::PartialFailure {
                failed: 2,
                requested: 3
            }
        ));

        let printed: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(printed.len(), 1);
        assert_eq!(printed[0]["shortName"], "demof01");

        let errors = String::from_utf8(errors).unwrap();
        assert!(errors.contains("unknown01"));
        assert!(errors.contains("panas01"));
    }
}
