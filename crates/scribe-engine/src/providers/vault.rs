//! Local-filesystem vault backed by `tokio::fs`.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::traits::VaultOps;

/// A vault rooted at a local directory. Every path is confined to the
/// root; references that escape it resolve to `None`.
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    /// Create a vault over the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// Normalize a reference to a clean relative path, or `None` when it is
/// absolute, empty, or climbs out of the root.
fn normalize(reference: &str) -> Option<String> {
    let path = Path::new(reference.trim());
    let mut parts: Vec<&str> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}

#[async_trait]
impl VaultOps for LocalVault {
    fn exists(&self, path: &str) -> bool {
        self.absolute(path).is_file()
    }

    async fn read(&self, path: &str) -> Result<String, io::Error> {
        tokio::fs::read_to_string(self.absolute(path)).await
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), io::Error> {
        let absolute = self.absolute(path);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(absolute, content).await
    }

    async fn create_dir_all(&self, path: &str) -> Result<(), io::Error> {
        tokio::fs::create_dir_all(self.absolute(path)).await
    }

    fn resolve_path(&self, reference: &str) -> Option<String> {
        normalize(reference)
    }
}
