//! End-to-end rollovers through the in-memory client

mod common;

use common::*;
use ilm_rollover::error::{ClientError, StepError};
use ilm_rollover::metadata::LIFECYCLE_INDEXING_COMPLETE;
use ilm_rollover::{AsyncActionStep, LocalRolloverClient, ProjectMetadata, RolloverClient};
use tempfile::tempdir;
use tokio::sync::Mutex;

fn local_step(project: &ProjectMetadata) -> (ilm_rollover::RolloverStep, Arc<Mutex<ProjectMetadata>>) {
    let shared = Arc::new(Mutex::new(project.clone()));
    let client = LocalRolloverClient::new(Arc::clone(&shared)).with_fixed_time(TS);
    (rollover_step(Arc::new(client) as Arc<dyn RolloverClient>), shared)
}

#[tokio::test]
async fn test_alias_generations_roll_forward() {
    let first = aliased_index("app-000001", "app");
    let (step, shared) = local_step(&single_index_project(&first));

    // Generation 1 -> 2
    let snapshot = shared.lock().await.clone();
    step.perform_action(&first, &snapshot).await.unwrap();

    let snapshot = shared.lock().await.clone();
    let old = snapshot.index("app-000001").unwrap().clone();
    let second = snapshot.index("app-000002").unwrap().clone();
    assert!(old.rollover_info("app").is_some());

    // Re-running on the old generation is a no-op
    step.perform_action(&old, &snapshot).await.unwrap();
    assert!(shared.lock().await.index("app-000003").is_none());

    // Generation 2 -> 3
    step.perform_action(&second, &snapshot).await.unwrap();
    let snapshot = shared.lock().await.clone();
    assert_eq!(snapshot.alias_write_index("app").unwrap().name, "app-000003");
}

#[tokio::test]
async fn test_data_stream_both_sides_roll_independently() {
    let (project, backing, failures) = data_stream_project(1);
    let (step, shared) = local_step(&project);

    let write = project.index(&backing[0]).unwrap().clone();
    step.perform_action(&write, &project).await.unwrap();

    let snapshot = shared.lock().await.clone();
    let failure_write = snapshot.index(&failures[0]).unwrap().clone();
    step.perform_action(&failure_write, &snapshot).await.unwrap();

    let snapshot = shared.lock().await.clone();
    let ds = snapshot.data_stream(DATA_STREAM).unwrap();
    assert_eq!(ds.indices.len(), 2);
    assert_eq!(ds.failure_indices.len(), 2);
    assert_eq!(ds.generation, 3);
    assert_eq!(ds.write_index(), Some(".ds-test-datastream-2024.03.05-000002"));
    assert_eq!(
        ds.failure_store_write_index(),
        Some(".fs-test-datastream-2024.03.05-000003")
    );

    // Old generations are skipped without touching the topology
    let before = snapshot.clone();
    step.perform_action(&write, &snapshot).await.unwrap();
    step.perform_action(&failure_write, &snapshot).await.unwrap();
    assert_eq!(*shared.lock().await, before);
}

#[tokio::test]
async fn test_indexing_complete_leaves_topology_untouched() {
    let index = aliased_index("app-000001", "app").with_setting(LIFECYCLE_INDEXING_COMPLETE, "true");
    let project = single_index_project(&index);
    let (step, shared) = local_step(&project);

    step.perform_action(&index, &project).await.unwrap();

    assert_eq!(*shared.lock().await, project);
}

#[tokio::test]
async fn test_rollover_for_other_project_is_not_found() {
    let index = aliased_index("app-000001", "app");
    let project = single_index_project(&index);
    let (step, shared) = local_step(&project);

    let mut foreign = project.clone();
    foreign.id = "tenant-b".to_string();
    let err = step.perform_action(&index, &foreign).await.unwrap_err();

    match err {
        StepError::Client(ClientError::ResourceNotFound(message)) => {
            assert_eq!(message, "project [tenant-b] not found")
        }
        other => panic!("Expected resource not found, got {:?}", other),
    }
    assert_eq!(*shared.lock().await, project);
}

#[tokio::test]
async fn test_state_file_round_trip_after_rollover() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("state.json");

    let (project, backing, _) = data_stream_project(1);
    project.save(&path).unwrap();

    let loaded = ProjectMetadata::load(&path).unwrap();
    let (step, shared) = local_step(&loaded);
    let write = loaded.index(&backing[0]).unwrap().clone();
    step.perform_action(&write, &loaded).await.unwrap();

    shared.lock().await.save(&path).unwrap();

    let reloaded = ProjectMetadata::load(&path).unwrap();
    assert_eq!(
        reloaded.data_stream(DATA_STREAM).unwrap().write_index(),
        Some(".ds-test-datastream-2024.03.05-000002")
    );
}
