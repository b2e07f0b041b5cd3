use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::host::ImageStore;
use crate::upload::DEFAULT_FILE_NAME;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("image directory missing or not writable: {0}")]
    ImageDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Filesystem-backed image store: atomic write under a root directory,
/// returning URLs relative to the host's public root.
pub struct LocalImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: PathBuf, url_prefix: impl Into<String>) -> Self {
        Self {
            root,
            url_prefix: url_prefix.into(),
        }
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        if self.root.exists() {
            let meta = fs::metadata(&self.root).map_err(|e| StoreError::ImageDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(StoreError::ImageDir("path is not a directory".into()));
            }
        } else {
            fs::create_dir_all(&self.root).map_err(|e| StoreError::ImageDir(e.to_string()))?;
        }
        Ok(())
    }

    /// Write bytes to `{root}/{file_name}` via a temp file then rename.
    fn write_atomic(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        self.ensure_root()?;

        let target = self.root.join(file_name);
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace an existing file of the same name.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(target)
    }
}

#[async_trait::async_trait]
impl ImageStore for LocalImageStore {
    async fn store(
        &self,
        bytes: Vec<u8>,
        mime: &str,
        file_name: &str,
    ) -> Result<String, StoreError> {
        let name = with_extension(sanitize_file_name(file_name), mime);
        self.write_atomic(&name, &bytes)?;
        Ok(format!("{}/{}", self.url_prefix.trim_end_matches('/'), name))
    }
}

/// Keep file names host-safe: alphanumerics, dash, underscore, dot; no
/// leading or trailing dots so names cannot escape or hide.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Append an extension derived from the mime subtype when the name lacks one.
fn with_extension(name: String, mime: &str) -> String {
    if Path::new(&name).extension().is_some() {
        return name;
    }
    match mime.split('/').nth(1) {
        Some(subtype) if !subtype.is_empty() => format!("{name}.{subtype}"),
        _ => name,
    }
}
