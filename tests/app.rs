use serde_yaml::Mapping;

use pecha_meta_updater::app::App;
use pecha_meta_updater::bdrc::CatalogClient;
use pecha_meta_updater::domain::{PechaId, VolumeInfo, WorkId};
use pecha_meta_updater::error::MetaError;
use pecha_meta_updater::openpecha::MetadataClient;

const TWO_VOLUME_TTL: &str = r#"
@prefix bdr: <http://purl.bdrc.io/resource/> .
@prefix bdo: <http://purl.bdrc.io/ontology/core/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

bdr:W22083 bdo:instanceHasVolume bdr:I1002 , bdr:I1001 .
bdr:I1001 rdfs:comment "Vol 1" ;
    bdo:volumeNumber 1 ;
    bdo:volumePagesTotal 50 .
bdr:I1002 bdo:volumeNumber 2 .
"#;

struct MockCatalog {
    ttl: &'static str,
}

impl CatalogClient for MockCatalog {
    fn fetch_graph(&self, _work_id: &WorkId) -> Result<String, MetaError> {
        Ok(self.ttl.to_string())
    }
}

struct FailingCatalog;

impl CatalogClient for FailingCatalog {
    fn fetch_graph(&self, _work_id: &WorkId) -> Result<String, MetaError> {
        Err(MetaError::CatalogStatus {
            status: 404,
            message: "not found".to_string(),
        })
    }
}

struct MockMetadata {
    yaml: &'static str,
}

impl MetadataClient for MockMetadata {
    fn fetch_meta(&self, _pecha_id: &PechaId) -> Result<Mapping, MetaError> {
        Ok(serde_yaml::from_str(self.yaml).unwrap())
    }
}

struct FailingMetadata;

impl MetadataClient for FailingMetadata {
    fn fetch_meta(&self, pecha_id: &PechaId) -> Result<Mapping, MetaError> {
        Err(MetaError::MetadataStatus {
            status: 404,
            message: format!("no meta.yml for {pecha_id}"),
        })
    }
}

fn ids() -> (WorkId, PechaId) {
    ("W22083".parse().unwrap(), "P000003".parse().unwrap())
}

#[test]
fn update_writes_merged_meta_with_sorted_volumes() {
    let temp = tempfile::tempdir().unwrap();
    let (work_id, pecha_id) = ids();
    let app = App::new(
        MockCatalog { ttl: TWO_VOLUME_TTL },
        MockMetadata {
            yaml: "id: P000003\nsource_metadata:\n  title: kangyur\n",
        },
        temp.path(),
    );

    let outcome = app.update(&work_id, &pecha_id).unwrap();
    assert_eq!(outcome.volume_count, 2);
    assert_eq!(outcome.path, temp.path().join("P000003").join("meta.yml"));

    let body = std::fs::read_to_string(&outcome.path).unwrap();
    let meta: Mapping = serde_yaml::from_str(&body).unwrap();
    let source_metadata = meta.get("source_metadata").unwrap().as_mapping().unwrap();
    assert_eq!(source_metadata.get("title").unwrap().as_str(), Some("kangyur"));

    let volumes = source_metadata.get("volume").unwrap().as_mapping().unwrap();
    let records: Vec<VolumeInfo> = volumes
        .values()
        .map(|value| serde_yaml::from_value(value.clone()).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].image_group_id, "I1001");
    assert_eq!(records[0].title, "Vol 1");
    assert_eq!(records[0].volume_number, 1);
    assert_eq!(records[0].total_pages, 50);
    assert_eq!(records[1].image_group_id, "I1002");
    assert_eq!(records[1].title, "");
    assert_eq!(records[1].volume_number, 2);
    assert_eq!(records[1].total_pages, 0);
}

#[test]
fn catalog_failure_still_writes_meta_with_empty_volume_section() {
    let temp = tempfile::tempdir().unwrap();
    let (work_id, pecha_id) = ids();
    let app = App::new(
        FailingCatalog,
        MockMetadata {
            yaml: "id: P000003\nsource_metadata: {}\n",
        },
        temp.path(),
    );

    let outcome = app.update(&work_id, &pecha_id).unwrap();
    assert_eq!(outcome.volume_count, 0);

    let body = std::fs::read_to_string(&outcome.path).unwrap();
    let meta: Mapping = serde_yaml::from_str(&body).unwrap();
    let source_metadata = meta.get("source_metadata").unwrap().as_mapping().unwrap();
    let volumes = source_metadata.get("volume").unwrap().as_mapping().unwrap();
    assert!(volumes.is_empty());
}

#[test]
fn metadata_failure_propagates_and_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let (work_id, pecha_id) = ids();
    let app = App::new(
        MockCatalog { ttl: TWO_VOLUME_TTL },
        FailingMetadata,
        temp.path(),
    );

    let err = app.update(&work_id, &pecha_id).unwrap_err();
    assert!(matches!(err, MetaError::MetadataStatus { .. }));
    assert!(!temp.path().join("P000003").exists());
}

#[test]
fn meta_without_source_metadata_passes_through_unchanged() {
    let temp = tempfile::tempdir().unwrap();
    let (work_id, pecha_id) = ids();
    let app = App::new(
        MockCatalog { ttl: TWO_VOLUME_TTL },
        MockMetadata {
            yaml: "id: P000003\n",
        },
        temp.path(),
    );

    let outcome = app.update(&work_id, &pecha_id).unwrap();
    let body = std::fs::read_to_string(&outcome.path).unwrap();
    let meta: Mapping = serde_yaml::from_str(&body).unwrap();
    assert_eq!(meta.get("id").unwrap().as_str(), Some("P000003"));
    assert!(meta.get("source_metadata").is_none());
    assert!(meta.get("volume").is_none());
}

#[test]
fn two_runs_produce_same_content_under_fresh_keys() {
    let temp = tempfile::tempdir().unwrap();
    let (work_id, pecha_id) = ids();
    let app = App::new(
        MockCatalog { ttl: TWO_VOLUME_TTL },
        MockMetadata {
            yaml: "id: P000003\nsource_metadata: {}\n",
        },
        temp.path(),
    );

    let volumes_of = |path: &std::path::Path| -> Mapping {
        let body = std::fs::read_to_string(path).unwrap();
        let meta: Mapping = serde_yaml::from_str(&body).unwrap();
        meta.get("source_metadata")
            .unwrap()
            .as_mapping()
            .unwrap()
            .get("volume")
            .unwrap()
            .as_mapping()
            .unwrap()
            .clone()
    };

    let first = volumes_of(&app.update(&work_id, &pecha_id).unwrap().path);
    let second = volumes_of(&app.update(&work_id, &pecha_id).unwrap().path);

    let keys = |volumes: &Mapping| -> Vec<String> {
        volumes
            .keys()
            .map(|key| key.as_str().unwrap().to_string())
            .collect()
    };
    assert_ne!(keys(&first), keys(&second));

    let records = |volumes: &Mapping| -> Vec<VolumeInfo> {
        volumes
            .values()
            .map(|value| serde_yaml::from_value(value.clone()).unwrap())
            .collect()
    };
    assert_eq!(records(&first), records(&second));
}
