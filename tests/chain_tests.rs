use std::sync::Arc;

use reconpipe::{ChainedTask, ProcessRegistry};

#[tokio::test]
async fn failing_primary_short_circuits_the_follow_up() {
    let dir = tempfile::tempdir().unwrap();
    let sentinel = dir.path().join("sentinel");
    let registry = Arc::new(ProcessRegistry::new());

    let done = ChainedTask::new("false")
        .then(format!("touch {}", sentinel.display()))
        .spawn(registry)
        .await
        .unwrap();

    assert!(!done);
    assert!(!sentinel.exists());
}

#[tokio::test]
async fn follow_up_runs_after_a_successful_primary() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    let registry = Arc::new(ProcessRegistry::new());

    let done = ChainedTask::new(format!("touch {}", first.display()))
        .then(format!("touch {}", second.display()))
        .spawn(registry)
        .await
        .unwrap();

    assert!(done);
    assert!(first.exists());
    assert!(second.exists());
}

#[tokio::test]
async fn primary_and_follow_up_share_one_log_sink() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("chain.log");
    let registry = Arc::new(ProcessRegistry::new());

    let done = ChainedTask::new("echo one")
        .then("echo two")
        .log_to(&log)
        .spawn(registry)
        .await
        .unwrap();

    assert!(done);
    assert_eq!(std::fs::read_to_string(&log).unwrap(), "one\ntwo\n");
}

#[tokio::test]
async fn spawn_returns_before_the_primary_finishes() {
    let registry = Arc::new(ProcessRegistry::new());
    let start = std::time::Instant::now();
    let handle = ChainedTask::new("sleep 1").spawn(registry);
    assert!(start.elapsed() < std::time::Duration::from_millis(500));
    assert!(handle.await.unwrap());
}
