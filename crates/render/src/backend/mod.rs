//! Output backends: turn a laid-out [`Document`] into bytes.

mod pdf;
mod transcript;

pub use pdf::PdfBackend;
pub use transcript::TranscriptBackend;

use revline_core::{AssetKind, DocumentResult};

use crate::assets::AssetStore;
use crate::document::Document;

/// Bytes produced by a backend, plus the images it had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub skipped_assets: Vec<AssetKind>,
}

impl Rendered {
    pub(crate) fn skip(&mut self, asset: AssetKind) {
        if !self.skipped_assets.contains(&asset) {
            self.skipped_assets.push(asset);
        }
    }
}

pub trait DocumentBackend: Send + Sync {
    fn mime_type(&self) -> &'static str;

    /// File extension without the leading dot.
    fn extension(&self) -> &'static str;

    /// Produce the final bytes.
    ///
    /// Missing or undecodable images are not errors: they are reported in
    /// [`Rendered::skipped_assets`] and the rest of the page is drawn.
    fn render(&self, document: &Document, assets: &AssetStore) -> DocumentResult<Rendered>;
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for Box<B> {
    fn mime_type(&self) -> &'static str {
        (**self).mime_type()
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn render(&self, document: &Document, assets: &AssetStore) -> DocumentResult<Rendered> {
        (**self).render(document, assets)
    }
}
