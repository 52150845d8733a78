//! Loading catalog documents from disk.

use std::fs;
use std::path::Path;

use prisma_catalog::{load_catalog, sample_catalog, CatalogError, MetricStatus, QueueStatus};

fn fixture() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/sample_catalog.json")
}

#[test]
fn fixture_file_matches_bundled_catalog() {
    let from_disk = load_catalog(&fixture()).unwrap();
    assert_eq!(from_disk, sample_catalog().unwrap());
    assert!(from_disk
        .validation_queue
        .iter()
        .all(|item| item.status == QueueStatus::Pending));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalog(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn every_violation_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{
          "metrics": [
            { "id": "Growth.MAU", "name": "MAU", "version": 0, "status": "canonical",
              "owners": { "business": ["@ana"], "tech": ["@ana"] } }
          ],
          "validationQueue": [
            { "metricId": "growth.mau", "status": "flagged", "changeType": "update" }
          ]
        }"#,
    )
    .unwrap();

    let Err(CatalogError::Invalid(violations)) = load_catalog(&path) else {
        panic!("expected invariant violations");
    };
    let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(
        messages,
        [
            "id must have the form domain.metric_name",
            "version must be at least 1",
            "'@ana' is listed as both business and tech owner",
            "canonical metric with failing auto-checks",
            "flagged without a reason",
        ]
    );
}

#[test]
fn deprecated_metrics_load() {
    let json = sample_catalog()
        .map(|c| serde_json::to_string(&c).unwrap())
        .unwrap()
        .replace("\"experimental\"", "\"deprecated\"");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, json).unwrap();

    let catalog = load_catalog(&path).unwrap();
    let conversion = catalog
        .metrics
        .iter()
        .find(|m| m.id == "product.conversion_rate")
        .unwrap();
    assert_eq!(conversion.status, MetricStatus::Deprecated);
}
