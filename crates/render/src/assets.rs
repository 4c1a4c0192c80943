//! Image assets (logo, watermark) handed to backends as raw bytes.

use std::collections::HashMap;
use std::path::Path;

use revline_core::{AssetKind, DocumentError};

use crate::config::RenderConfig;

#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    images: HashMap<AssetKind, Vec<u8>>,
    failures: Vec<DocumentError>,
}

impl AssetStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, kind: AssetKind, bytes: Vec<u8>) -> Self {
        self.images.insert(kind, bytes);
        self
    }

    /// Read the configured asset files.
    ///
    /// A file that cannot be read is logged and left out; rendering goes on
    /// without it.
    pub fn load(config: &RenderConfig) -> Self {
        let mut store = Self::empty();
        let configured = [
            (AssetKind::Logo, config.logo_path.as_deref()),
            (AssetKind::Watermark, config.watermark_path.as_deref()),
        ];
        for (kind, path) in configured {
            if let Some(path) = path {
                store.load_file(kind, path);
            }
        }
        store
    }

    fn load_file(&mut self, kind: AssetKind, path: &Path) {
        match std::fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => {
                self.images.insert(kind, bytes);
            }
            Ok(_) => self.record_failure(kind, format!("{} is empty", path.display())),
            Err(e) => self.record_failure(kind, format!("{}: {e}", path.display())),
        }
    }

    fn record_failure(&mut self, kind: AssetKind, reason: String) {
        let err = DocumentError::asset(kind, reason);
        tracing::warn!(asset = %kind, error = %err, "asset not loaded; documents will omit it");
        self.failures.push(err);
    }

    pub fn get(&self, kind: AssetKind) -> Option<&[u8]> {
        self.images.get(&kind).map(Vec::as_slice)
    }

    pub fn contains(&self, kind: AssetKind) -> bool {
        self.images.contains_key(&kind)
    }

    pub fn load_failures(&self) -> &[DocumentError] {
        &self.failures
    }
}
