use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::registry::ProcessRegistry;
use super::runner;

/// A primary command whose success gates an optional follow-up
/// command; both write to the same log sink, strictly in sequence.
#[derive(Debug, Clone)]
pub struct ChainedTask {
    pub primary: String,
    pub follow_up: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ChainedTask {
    pub fn new(primary: impl Into<String>) -> Self {
        Self { primary: primary.into(), follow_up: None, log_file: None }
    }

    pub fn then(mut self, follow_up: impl Into<String>) -> Self {
        self.follow_up = Some(follow_up.into());
        self
    }

    pub fn log_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Execute asynchronously; the caller may await the handle to
    /// observe completion of both steps. A failing primary
    /// short-circuits the follow-up, which is never started.
    pub fn spawn(self, registry: Arc<ProcessRegistry>) -> JoinHandle<bool> {
        let ChainedTask { primary, follow_up, log_file } = self;
        tokio::spawn(async move {
            if !runner::run(&registry, &primary, log_file.as_deref()).await {
                return false;
            }
            match follow_up {
                Some(next) => {
                    tracing::info!("[chaining] {next}");
                    runner::run(&registry, &next, log_file.as_deref()).await
                }
                None => true,
            }
        })
    }
}
