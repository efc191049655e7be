use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use super::platform;
use super::registry::{ManagedProcess, ProcessRegistry};

/// Run one external command to completion through `sh -c`, appending
/// combined stdout/stderr to `log_file` when given, discarding it
/// otherwise. The child gets its own process group and stays in the
/// registry for exactly as long as it is alive. Returns true iff the
/// command exited with status 0; spawn and supervision errors are
/// logged and reported as false, never raised.
pub async fn run(registry: &ProcessRegistry, cmd: &str, log_file: Option<&Path>) -> bool {
    tracing::info!("[starting] {cmd}");

    let (stdout, stderr) = match open_sink(log_file) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("[error] {cmd}: cannot open log sink: {e}");
            return false;
        }
    };

    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr);
    platform::prepare_command(&mut command);

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::error!("[error] {cmd} failed to spawn: {e}");
            return false;
        }
    };

    let pid = child.id().unwrap_or_default();
    registry.register(ManagedProcess { pid, command: cmd.to_string() });

    let success = match child.wait().await {
        Ok(status) if status.success() => {
            tracing::info!("[completed] {cmd}");
            true
        }
        Ok(status) => {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "killed by signal".into());
            tracing::error!("[failed] {cmd}, exit code = {code}");
            false
        }
        Err(e) => {
            tracing::error!("[error] {cmd} failed: {e}");
            match platform::terminate_group(pid) {
                Ok(()) => tracing::info!("[{cmd}] terminated"),
                Err(kill_err) => tracing::error!("failed to terminate {cmd}: {kill_err}"),
            }
            false
        }
    };

    registry.deregister(pid);
    success
}

fn open_sink(log_file: Option<&Path>) -> std::io::Result<(Stdio, Stdio)> {
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
            let stderr = file.try_clone()?;
            Ok((file.into(), stderr.into()))
        }
        None => Ok((Stdio::null(), Stdio::null())),
    }
}
