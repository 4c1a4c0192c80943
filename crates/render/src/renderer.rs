//! Record → layout → backend → [`Artifact`].

use revline_core::{DocumentError, DocumentResult};
use revline_records::{InvoiceRecord, PayslipRecord, TaskSheet};

use crate::artifact::{Artifact, invoice_stem, payslip_stem, task_sheet_stem};
use crate::assets::AssetStore;
use crate::backend::{DocumentBackend, PdfBackend};
use crate::config::RenderConfig;
use crate::document::Document;
use crate::layout;

/// Turns records into downloadable documents.
///
/// Rendering is synchronous and holds no state between calls; one renderer
/// can serve any number of documents.
pub struct Renderer<B = PdfBackend> {
    backend: B,
    config: RenderConfig,
    assets: AssetStore,
}

impl Renderer<PdfBackend> {
    /// PDF renderer with assets loaded from the configured paths.
    pub fn pdf(config: RenderConfig) -> Self {
        let assets = AssetStore::load(&config);
        Self::new(PdfBackend, config, assets)
    }
}

impl<B: DocumentBackend> Renderer<B> {
    pub fn new(backend: B, config: RenderConfig, assets: AssetStore) -> Self {
        Self {
            backend,
            config,
            assets,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render_invoice(&self, record: &InvoiceRecord) -> DocumentResult<Artifact> {
        let span = tracing::info_span!("render_invoice", invoice_id = record.invoice_id());
        let _guard = span.enter();
        let stem = invoice_stem(record.invoice_id());
        self.finish(stem, layout::invoice_document(record, &self.config))
    }

    pub fn render_payslip(&self, record: &PayslipRecord) -> DocumentResult<Artifact> {
        let span = tracing::info_span!(
            "render_payslip",
            employee_id = record.employee_id(),
            month = %record.month()
        );
        let _guard = span.enter();
        let stem = payslip_stem(record.employee_id(), record.month());
        self.finish(stem, layout::payslip_document(record, &self.config))
    }

    pub fn render_task_sheet(&self, sheet: &TaskSheet) -> DocumentResult<Artifact> {
        let span = tracing::info_span!("render_task_sheet", orders = sheet.entries().len());
        let _guard = span.enter();
        self.finish(task_sheet_stem(), Ok(layout::task_sheet_document(sheet)))
    }

    fn finish(&self, stem: String, document: DocumentResult<Document>) -> DocumentResult<Artifact> {
        let result = document.and_then(|doc| self.encode(stem, &doc));
        match &result {
            Ok(artifact) => tracing::info!(
                filename = %artifact.filename,
                bytes = artifact.bytes.len(),
                skipped = ?artifact.skipped_assets,
                "document rendered"
            ),
            Err(err) => tracing::error!(error = %err, "document render failed"),
        }
        result
    }

    fn encode(&self, stem: String, document: &Document) -> DocumentResult<Artifact> {
        let rendered = self.backend.render(document, &self.assets).map_err(|err| match err {
            DocumentError::GenerationFailure(_) => err,
            other => DocumentError::generation(other.to_string()),
        })?;

        let mut skipped = rendered.skipped_assets;
        skipped.sort();
        skipped.dedup();

        Ok(Artifact {
            filename: format!("{stem}.{}", self.backend.extension()),
            mime_type: self.backend.mime_type(),
            bytes: rendered.bytes,
            skipped_assets: skipped,
        })
    }
}
