// catalogo/src/upload.rs

//! Photo uploads: renaming, writing under the uploads directory, reading back.

use crate::error::CatalogoResult;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

/// Characters removed from client-supplied filenames.
const STRIPPED_CHARS: [char; 5] = [' ', '_', ':', '/', '\\'];

pub fn sanitize_filename(original: &str) -> String {
  original.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

#[derive(Debug, Clone)]
pub struct UploadDir {
  root: PathBuf,
}

impl UploadDir {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// `<random uuid>-<sanitized original>`, or `None` when no file was chosen
  /// (browsers send an empty filename for an untouched file input).
  pub fn filename_for(original: &str) -> Option<String> {
    let sanitized = sanitize_filename(original);
    if sanitized.is_empty() {
      return None;
    }
    Some(format!("{}-{}", Uuid::new_v4(), sanitized))
  }

  /// Writes `bytes` under a fresh name derived from `original` and returns that name.
  /// An empty `original` writes nothing and returns `None`.
  pub async fn store(&self, original: &str, bytes: &[u8]) -> CatalogoResult<Option<String>> {
    let Some(name) = Self::filename_for(original) else {
      debug!("Empty upload filename, nothing stored.");
      return Ok(None);
    };
    tokio::fs::create_dir_all(&self.root).await?;
    tokio::fs::write(self.root.join(&name), bytes).await?;
    info!(original, stored_as = %name, size = bytes.len(), "Upload stored.");
    Ok(Some(name))
  }

  /// Bytes of a previously stored upload. Names that could leave the uploads
  /// directory are treated like missing files.
  pub async fn read(&self, name: &str) -> CatalogoResult<Option<Vec<u8>>> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
      return Ok(None);
    }
    match tokio::fs::read(self.root.join(name)).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_separators_spaces_and_underscores() {
    assert_eq!(sanitize_filename("my photo_2024:01/02\\x.png"), "myphoto20240102x.png");
  }

  #[test]
  fn empty_original_means_no_file() {
    assert!(UploadDir::filename_for("").is_none());
    assert!(UploadDir::filename_for(" _/").is_none());
  }

  #[test]
  fn generated_names_have_a_random_prefix() {
    let a = UploadDir::filename_for("tv.png").unwrap();
    let b = UploadDir::filename_for("tv.png").unwrap();
    assert_ne!(a, b);
    assert!(a.ends_with("-tv.png"));
  }
}
