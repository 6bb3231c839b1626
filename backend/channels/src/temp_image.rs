//! Per-request image files.
//!
//! Each download lands in its own uniquely named file so concurrent requests
//! never share a path. The file is removed when the guard is dropped, which
//! covers early returns and errors as well as the normal path.

use std::path::{Path, PathBuf};

use signalbot_core::{Result, SignalError};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct TempImage {
    path: PathBuf,
}

impl TempImage {
    /// Write `bytes` to `<dir>/signalbot-<request_id>.img`, creating `dir`
    /// if needed.
    pub async fn write(dir: &Path, request_id: Uuid, bytes: &[u8]) -> Result<Self> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| SignalError::Download(format!("cannot create {}: {e}", dir.display())))?;

        // Guard first, so a partial file from a failed write is removed too.
        let image = Self {
            path: dir.join(format!("signalbot-{request_id}.img")),
        };
        tokio::fs::write(&image.path, bytes).await.map_err(|e| {
            SignalError::Download(format!("cannot write {}: {e}", image.path.display()))
        })?;

        debug!(path = %image.path.display(), bytes = bytes.len(), "Image cached");
        Ok(image)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Image removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove image"),
        }
    }
}
