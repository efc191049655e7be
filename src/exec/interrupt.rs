use std::sync::Arc;

use super::registry::ProcessRegistry;

/// Install the Ctrl+C watcher. On interrupt every registered process
/// group is terminated and the program exits with a clean status.
/// Safe to install before anything has been registered.
pub fn install(registry: Arc<ProcessRegistry>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for interrupt: {e}");
            return;
        }
        tracing::info!(
            "interrupt received, cleaning up {} running process(es)",
            registry.len()
        );
        registry.terminate_all();
        std::process::exit(0);
    });
}
