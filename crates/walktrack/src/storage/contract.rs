//! Behavior every storage backend must share, run from each backend's tests.

use chrono::{TimeZone, Utc};
use walktrack_core::records::{KeyKind, RecordId, UserRecord, WalkRecord};
use walktrack_core::storage::{StorageBackend, UserRepository, WalkRepository};

pub fn user_record(name: &str, email: &str) -> UserRecord {
    UserRecord {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
    }
}

pub fn walk_record(user_id: &str, hour: u32) -> WalkRecord {
    WalkRecord {
        id: None,
        user_id: user_id.to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
        end_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, hour, 30, 0).unwrap()),
        distance_meters: 1200.5,
        polyline: Some("[-34.9, -56.16, -34.91, -56.17]".to_string()),
        duration_seconds: Some(1800),
    }
}

/// An id of the backend's own kind that no record uses.
fn missing_id(backend: &dyn StorageBackend) -> RecordId {
    match backend.key_kind() {
        KeyKind::Numeric => RecordId::Numeric(i64::MAX),
        KeyKind::Opaque => RecordId::Opaque("missing".to_string()),
    }
}

/// An id of the other kind, which the backend can never have issued.
fn foreign_id(backend: &dyn StorageBackend) -> RecordId {
    match backend.key_kind() {
        KeyKind::Numeric => RecordId::Opaque("1".to_string()),
        KeyKind::Opaque => RecordId::Numeric(1),
    }
}

pub async fn user_lifecycle<R: UserRepository>(repo: &R) {
    let mut user = user_record("Ana", "ana@example.com");
    let id = repo.create_user(&mut user).await.unwrap();

    assert_eq!(id.kind(), repo.key_kind());
    assert_eq!(user.id.as_ref(), Some(&id));
    assert_eq!(repo.get_user(&id).await.unwrap(), Some(user.clone()));
    assert_eq!(repo.list_users().await.unwrap(), vec![user.clone()]);

    let replacement = user_record("Ana María", "ana.maria@example.com");
    assert!(repo.update_user(&id, &replacement).await.unwrap());

    let stored = repo.get_user(&id).await.unwrap().unwrap();
    assert_eq!(stored.id, Some(id.clone()));
    assert_eq!(stored.name, "Ana María");
    assert_eq!(stored.email, "ana.maria@example.com");

    assert!(repo.delete_user(&id).await.unwrap());
    assert_eq!(repo.get_user(&id).await.unwrap(), None);
    assert!(!repo.delete_user(&id).await.unwrap());
    assert!(repo.list_users().await.unwrap().is_empty());
}

pub async fn update_missing_user_writes_nothing<R: UserRepository>(repo: &R) {
    let mut existing = user_record("Ana", "ana@example.com");
    repo.create_user(&mut existing).await.unwrap();

    let missing = missing_id(repo);
    let updated = repo
        .update_user(&missing, &user_record("Ghost", "ghost@example.com"))
        .await
        .unwrap();

    assert!(!updated);
    assert_eq!(repo.get_user(&missing).await.unwrap(), None);
    assert_eq!(repo.list_users().await.unwrap(), vec![existing]);
}

pub async fn create_ignores_preset_id<R: UserRepository>(repo: &R) {
    let preset = missing_id(repo);
    let mut user = user_record("Ana", "ana@example.com");
    user.id = Some(preset.clone());

    let id = repo.create_user(&mut user).await.unwrap();

    assert_ne!(id, preset);
    assert_eq!(user.id, Some(id));
    assert_eq!(repo.get_user(&preset).await.unwrap(), None);
}

pub async fn walk_lifecycle<R: WalkRepository>(repo: &R) {
    let mut walk = walk_record("u1", 8);
    let id = repo.create_walk(&mut walk).await.unwrap();

    assert_eq!(id.kind(), repo.key_kind());
    assert_eq!(walk.id.as_ref(), Some(&id));
    assert_eq!(repo.get_walk(&id).await.unwrap(), Some(walk.clone()));

    let mut replacement = walk_record("u1", 9);
    replacement.end_time = None;
    replacement.polyline = None;
    replacement.duration_seconds = None;
    replacement.distance_meters = 0.0;
    assert!(repo.update_walk(&id, &replacement).await.unwrap());

    let stored = repo.get_walk(&id).await.unwrap().unwrap();
    assert_eq!(stored.id, Some(id.clone()));
    assert_eq!(stored.start_time, replacement.start_time);
    assert_eq!(stored.end_time, None);
    assert_eq!(stored.polyline, None);
    assert_eq!(stored.duration_seconds, None);
    assert_eq!(stored.distance_meters, 0.0);

    assert!(repo.delete_walk(&id).await.unwrap());
    assert_eq!(repo.get_walk(&id).await.unwrap(), None);
    assert!(!repo.delete_walk(&id).await.unwrap());
}

pub async fn list_walks_by_user_is_exact<R: WalkRepository>(repo: &R) {
    let mut mine = Vec::new();
    for hour in [7, 12] {
        let mut walk = walk_record("u1", hour);
        mine.push(repo.create_walk(&mut walk).await.unwrap());
    }
    for owner in ["u2", "u10", "U1"] {
        repo.create_walk(&mut walk_record(owner, 6)).await.unwrap();
    }

    let listed = repo.list_walks_by_user("u1").await.unwrap();
    let mut listed_ids: Vec<String> = listed
        .iter()
        .map(|w| w.id.as_ref().unwrap().to_string())
        .collect();
    let mut expected: Vec<String> = mine.iter().map(RecordId::to_string).collect();
    listed_ids.sort();
    expected.sort();

    assert_eq!(listed_ids, expected);
    assert!(listed.iter().all(|w| w.user_id == "u1"));
    assert!(repo.list_walks_by_user("nobody").await.unwrap().is_empty());
}

pub async fn update_missing_walk_writes_nothing<R: WalkRepository>(repo: &R) {
    let mut existing = walk_record("u1", 8);
    repo.create_walk(&mut existing).await.unwrap();

    let missing = missing_id(repo);
    assert!(!repo
        .update_walk(&missing, &walk_record("u1", 10))
        .await
        .unwrap());
    assert_eq!(repo.get_walk(&missing).await.unwrap(), None);
    assert_eq!(repo.list_walks_by_user("u1").await.unwrap(), vec![existing]);
}

pub async fn foreign_ids_are_not_found<R: UserRepository + WalkRepository>(repo: &R) {
    let mut user = user_record("Ana", "ana@example.com");
    repo.create_user(&mut user).await.unwrap();
    let mut walk = walk_record("u1", 8);
    repo.create_walk(&mut walk).await.unwrap();

    let foreign = foreign_id(repo);

    assert_eq!(repo.get_user(&foreign).await.unwrap(), None);
    assert!(!repo
        .update_user(&foreign, &user_record("Bea", "bea@example.com"))
        .await
        .unwrap());
    assert!(!repo.delete_user(&foreign).await.unwrap());

    assert_eq!(repo.get_walk(&foreign).await.unwrap(), None);
    assert!(!repo
        .update_walk(&foreign, &walk_record("u2", 9))
        .await
        .unwrap());
    assert!(!repo.delete_walk(&foreign).await.unwrap());

    assert_eq!(repo.list_users().await.unwrap(), vec![user]);
    assert_eq!(repo.list_walks_by_user("u1").await.unwrap(), vec![walk]);
}
