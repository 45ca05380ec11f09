use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::common::*;
use crate::domain::{JobId, JobKind, JobPatch, JobStatus};
use crate::stores::{JobStore, StoreError};

#[tokio::test]
async fn refresh_replaces_the_collection_for_the_company() {
    let gateway = Arc::new(MemoryGateway::with_jobs(vec![
        job("job-000001", "Backend Intern", JobKind::Remote, "Berlin"),
        job("job-000002", "Design Intern", JobKind::Hybrid, "Hamburg"),
    ]));
    let store = JobStore::new(gateway, company());

    store.refresh().await.expect("refresh succeeds");

    let jobs = store.jobs();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, JobId("job-000001".to_string()));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn add_inserts_the_server_issued_record() {
    let gateway = Arc::new(MemoryGateway::default());
    let store = JobStore::new(gateway, company());

    let job = store.add(draft_job("Data Intern")).await.expect("create succeeds");

    assert_eq!(job.id, JobId("job-000001".to_string()));
    assert_eq!(job.views, 0);
    assert_eq!(store.jobs().len(), 1);
}

#[tokio::test]
async fn update_reconciles_the_cache_from_the_response() {
    let gateway = Arc::new(MemoryGateway::with_jobs(vec![job(
        "job-000001",
        "Backend Intern",
        JobKind::Remote,
        "Berlin",
    )]));
    let store = JobStore::new(gateway, company());
    store.refresh().await.expect("refresh succeeds");

    let patch = JobPatch {
        status: Some(JobStatus::Paused),
        ..JobPatch::default()
    };
    let updated = store
        .update(&JobId("job-000001".to_string()), patch)
        .await
        .expect("update succeeds");

    assert_eq!(updated.status, JobStatus::Paused);
    let cached = store
        .get(&JobId("job-000001".to_string()))
        .expect("job cached");
    assert_eq!(cached.status, JobStatus::Paused);
}

#[tokio::test]
async fn remove_drops_the_posting() {
    let gateway = Arc::new(MemoryGateway::with_jobs(vec![job(
        "job-000001",
        "Backend Intern",
        JobKind::Remote,
        "Berlin",
    )]));
    let store = JobStore::new(gateway, company());
    store.refresh().await.expect("refresh succeeds");

    store
        .remove(&JobId("job-000001".to_string()))
        .await
        .expect("remove succeeds");

    assert!(store.jobs().is_empty());
}

#[tokio::test]
async fn get_is_local_only() {
    let gateway = Arc::new(MemoryGateway::with_jobs(vec![job(
        "job-000001",
        "Backend Intern",
        JobKind::Remote,
        "Berlin",
    )]));
    let store = JobStore::new(gateway.clone(), company());
    store.refresh().await.expect("refresh succeeds");
    let calls_after_refresh = gateway.call_count();

    let present = store.get(&JobId("job-000001".to_string()));
    let absent = store.get(&JobId("job-999999".to_string()));

    assert_eq!(
        present.expect("present id resolves").title,
        "Backend Intern"
    );
    assert!(absent.is_none());
    assert_eq!(gateway.call_count(), calls_after_refresh);
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_collection() {
    let gateway = Arc::new(MemoryGateway::with_jobs(vec![job(
        "job-000001",
        "Backend Intern",
        JobKind::Remote,
        "Berlin",
    )]));
    let store = JobStore::new(gateway.clone(), company());
    store.refresh().await.expect("first refresh succeeds");

    gateway.fail_fetches.store(true, Ordering::Relaxed);
    match store.refresh().await {
        Err(StoreError::Remote(_)) => {}
        other => panic!("expected remote error, got {other:?}"),
    }

    assert_eq!(store.jobs().len(), 1, "stale collection must survive");
    assert!(!store.is_loading());
}
