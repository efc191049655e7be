use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Count the lines of a text file.
pub fn count_lines(path: &Path) -> anyhow::Result<usize> {
    let data = fs::read_to_string(path)?;
    Ok(data.lines().count())
}
