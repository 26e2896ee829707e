use crate::core::interfaces::DirectoryProbe;
use crate::utils::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl DirectoryProbe for TokioFileSystemService {
    async fn directory_exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.map(|meta| meta.is_dir()).unwrap_or(false)
    }
}

/// Resolve the project root. A relative argument is taken from the current
/// directory; no argument means the current directory itself.
pub fn resolve_project_dir(directory: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(resolve_project_dir_from(&cwd, directory))
}

pub fn resolve_project_dir_from(cwd: &Path, directory: Option<&Path>) -> PathBuf {
    match directory {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    }
}
