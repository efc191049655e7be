use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use which::which;

/// Resolve a runnable tool: an explicit path wins when it exists on
/// disk, otherwise the system search path is consulted by name. A tool
/// that resolves neither way is a fatal condition for the caller.
pub fn locate_executable(name: &str, provided: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = provided {
        if path.exists() {
            tracing::debug!("using provided path for {name}: {}", path.display());
            return Ok(path.to_path_buf());
        }
    }

    if let Ok(path) = which(name) {
        tracing::debug!("found {name} in PATH: {}", path.display());
        return Ok(path);
    }

    bail!("{name} executable not found in PATH or at a provided path. Ensure it is installed or specify a valid path.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_explicit_path_is_returned_unchanged() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = locate_executable("whatever", Some(file.path())).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn invalid_explicit_path_falls_back_to_search_path() {
        let resolved =
            locate_executable("sh", Some(Path::new("/nonexistent/sh"))).unwrap();
        assert!(resolved.ends_with("sh"));
    }

    #[test]
    fn unresolvable_tool_is_an_error() {
        let err = locate_executable("definitely-not-a-real-tool-0x7f", None).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
