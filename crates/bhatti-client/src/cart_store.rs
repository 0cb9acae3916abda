//! Cart persisted as a JSON file between sessions

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use bhatti_core::domain::Cart;

use crate::error::ClientError;

pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file yields an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                warn!("Failed to read cart {}: {}", self.path.display(), e);
                return Cart::new();
            }
        };
        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt cart {}: {}", self.path.display(), e);
            Cart::new()
        })
    }

    /// Written to a sibling temp file first, then renamed into place.
    pub async fn save(&self, cart: &Cart) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(cart)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
