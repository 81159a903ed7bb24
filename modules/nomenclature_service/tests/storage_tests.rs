//! SeaORM document store against in-memory SQLite

use nomenclature_service::contract::*;
use nomenclature_service::domain::{DocumentRepository, NoOpEventPublisher, Service};
use nomenclature_service::infra::storage::SeaOrmDocumentRepository;
use serde_json::json;
use std::sync::Arc;

mod common;
use common::*;

async fn repo() -> SeaOrmDocumentRepository {
    SeaOrmDocumentRepository::new(sqlite_db().await)
}

#[tokio::test]
async fn test_insert_assigns_id_and_timestamps() {
    let repo = repo().await;

    let doc = repo
        .insert(EntityKind::Activity, json!({ "NameBG": "Калибриране", "NameEN": "Calibration" }))
        .await
        .unwrap();

    assert_eq!(doc.created_at, doc.updated_at);
    let found = repo.find(EntityKind::Activity, doc.id).await.unwrap().unwrap();
    assert_eq!(found.body["NameBG"], "Калибриране");
}

#[tokio::test]
async fn test_list_all_is_newest_first_per_collection() {
    let repo = repo().await;
    for n in 0..5 {
        repo.insert(EntityKind::Standard, json!({ "n": n })).await.unwrap();
        repo.insert(EntityKind::Quantity, json!({ "n": n })).await.unwrap();
    }

    let standards = repo.list_all(EntityKind::Standard).await.unwrap();
    let order: Vec<i64> = standards.iter().map(|d| d.body["n"].as_i64().unwrap()).collect();
    assert_eq!(order, [4, 3, 2, 1, 0]);

    assert_eq!(repo.count(EntityKind::Quantity).await.unwrap(), 5);
    assert_eq!(repo.count(EntityKind::Activity).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_is_scoped_to_the_collection() {
    let repo = repo().await;
    let doc = repo.insert(EntityKind::Activity, json!({})).await.unwrap();

    assert!(repo.find(EntityKind::Standard, doc.id).await.unwrap().is_none());
    assert!(!repo.delete(EntityKind::Standard, doc.id).await.unwrap());
    assert!(repo.find(EntityKind::Activity, doc.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_replace_keeps_identity_and_creation_time() {
    let repo = repo().await;
    let doc = repo
        .insert(EntityKind::Characteristic, json!({ "Unit": "kg" }))
        .await
        .unwrap();

    let replaced = repo
        .replace(EntityKind::Characteristic, doc.id, json!({ "Unit": "g" }))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.id, doc.id);
    assert_eq!(replaced.created_at, doc.created_at);
    assert!(replaced.updated_at >= doc.updated_at);
    assert_eq!(replaced.body["Unit"], "g");

    // Replacing keeps the position in the listing
    repo.insert(EntityKind::Characteristic, json!({ "Unit": "m" })).await.unwrap();
    let listed = repo.list_all(EntityKind::Characteristic).await.unwrap();
    assert_eq!(listed[1].id, doc.id);
}

#[tokio::test]
async fn test_replace_and_delete_of_absent_records() {
    let repo = repo().await;
    let id = RecordId::new();

    assert!(repo
        .replace(EntityKind::Activity, id, json!({}))
        .await
        .unwrap()
        .is_none());
    assert!(!repo.delete(EntityKind::Activity, id).await.unwrap());
}

#[tokio::test]
async fn test_service_round_trip_over_sqlite() {
    let service = Service::new(
        Arc::new(SeaOrmDocumentRepository::new(sqlite_db().await)),
        Arc::new(NoOpEventPublisher),
    );

    let first = RecordId::new();
    let second = RecordId::new();
    let mut draft = subcontractor("Лаб ООД", &[first, second, first]);
    draft.logo = Some(PNG_DATA_URL.to_string());

    let created = service.create::<Subcontractor>(draft).await.unwrap();
    assert_eq!(created.data.pt_scheme_object_ids, [first, second]);

    let loaded = service.get::<Subcontractor>(created.id).await.unwrap();
    assert_eq!(loaded, created);

    let updated = service
        .update::<Subcontractor>(created.id, subcontractor("Лаб 2 ООД", &[second]))
        .await
        .unwrap();
    assert_eq!(updated.data.logo, PNG_DATA_URL);
    assert_eq!(updated.data.pt_scheme_object_ids, [second]);
}
