use std::sync::Arc;

use reconpipe::exec::runner;
use reconpipe::ProcessRegistry;

#[tokio::test]
async fn zero_exit_reports_success_and_deregisters() {
    let registry = Arc::new(ProcessRegistry::new());
    let before = registry.len();
    assert!(runner::run(&registry, "true", None).await);
    assert_eq!(registry.len(), before);
}

#[tokio::test]
async fn nonzero_exit_reports_failure_and_deregisters() {
    let registry = Arc::new(ProcessRegistry::new());
    let before = registry.len();
    assert!(!runner::run(&registry, "false", None).await);
    assert_eq!(registry.len(), before);
}

#[tokio::test]
async fn output_is_appended_to_the_log_sink() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("tool.log");
    let registry = Arc::new(ProcessRegistry::new());

    assert!(runner::run(&registry, "echo first", Some(&log)).await);
    assert!(runner::run(&registry, "echo second 1>&2", Some(&log)).await);

    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(contents, "first\nsecond\n");
}

#[tokio::test]
async fn process_is_registered_while_running() {
    let registry = Arc::new(ProcessRegistry::new());
    let inner = registry.clone();
    let task = tokio::spawn(async move { runner::run(&inner, "sleep 2", None).await });

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    assert_eq!(registry.len(), 1);

    assert!(task.await.unwrap());
    assert!(registry.is_empty());
}
