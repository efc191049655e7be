use parking_lot::Mutex;

use super::platform;

/// One spawned external command, tracked from spawn until natural exit
/// or forced termination.
#[derive(Debug, Clone)]
pub struct ManagedProcess {
    pub pid: u32,
    pub command: String,
}

/// Process-wide set of running children. Registration happens from
/// worker tasks while `terminate_all` may run from the interrupt
/// watcher, so every mutation goes through the lock and the sweep
/// operates on a snapshot taken under it.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    entries: Mutex<Vec<ManagedProcess>>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A pid that is already registered is left alone so
    /// the registry never holds duplicates.
    pub fn register(&self, process: ManagedProcess) {
        let mut entries = self.entries.lock();
        if entries.iter().any(|p| p.pid == process.pid) {
            return;
        }
        entries.push(process);
    }

    /// Remove an entry once its process is known to have terminated.
    pub fn deregister(&self, pid: u32) {
        self.entries.lock().retain(|p| p.pid != pid);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Send SIGTERM to every registered process group and clear the
    /// registry. Individual failures are logged and do not stop the
    /// sweep. Returns the number of termination attempts.
    pub fn terminate_all(&self) -> usize {
        let snapshot = std::mem::take(&mut *self.entries.lock());
        for process in &snapshot {
            match platform::terminate_group(process.pid) {
                Ok(()) => {
                    tracing::info!(pid = process.pid, command = %process.command, "terminated process group")
                }
                Err(e) => {
                    tracing::error!(pid = process.pid, command = %process.command, "failed to terminate: {e}")
                }
            }
        }
        snapshot.len()
    }
}
