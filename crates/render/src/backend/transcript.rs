use std::fmt::{self, Write};

use revline_core::{DocumentError, DocumentResult};

use super::{DocumentBackend, Rendered};
use crate::assets::AssetStore;
use crate::document::{Align, Document, DrawOp, FontWeight, TableOp};

/// Plain-text listing of every draw instruction, page by page.
///
/// Used for reviewing layouts and for diffing output without a PDF viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscriptBackend;

impl DocumentBackend for TranscriptBackend {
    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &Document, assets: &AssetStore) -> DocumentResult<Rendered> {
        let mut rendered = Rendered::default();
        let mut out = String::new();
        write_document(&mut out, document, assets, &mut rendered)
            .map_err(|e| DocumentError::generation(format!("writing transcript: {e}")))?;
        rendered.bytes = out.into_bytes();
        Ok(rendered)
    }
}

fn write_document(
    out: &mut impl Write,
    document: &Document,
    assets: &AssetStore,
    rendered: &mut Rendered,
) -> fmt::Result {
    writeln!(out, "# {}", document.title)?;

    for (index, page) in document.pages.iter().enumerate() {
        writeln!(out, "\n## page {}", index + 1)?;
        for op in &page.ops {
            match op {
                DrawOp::Text(t) => {
                    let weight = match t.weight {
                        FontWeight::Regular => "regular",
                        FontWeight::Bold => "bold",
                    };
                    writeln!(
                        out,
                        "text {:.1},{:.1} {} {}pt {} {:?}",
                        t.x,
                        t.y,
                        weight,
                        t.size_pt,
                        align_name(t.align),
                        t.text
                    )?;
                }
                DrawOp::Image(img) => {
                    let state = if assets.contains(img.asset) {
                        "drawn"
                    } else {
                        rendered.skip(img.asset);
                        "skipped"
                    };
                    writeln!(
                        out,
                        "image {} {:.1},{:.1} {:.1}x{:.1} opacity {:.2} {}",
                        img.asset, img.x, img.y, img.width, img.height, img.opacity, state
                    )?;
                }
                DrawOp::Rect(r) => {
                    writeln!(out, "rect {:.1},{:.1} {:.1}x{:.1}", r.x, r.y, r.width, r.height)?;
                }
                DrawOp::Line(l) => {
                    writeln!(out, "line {:.1},{:.1} -> {:.1},{:.1}", l.x1, l.y1, l.x2, l.y2)?;
                }
                DrawOp::Table(table) => write_table(out, table)?,
            }
        }
    }
    Ok(())
}

fn write_table(out: &mut impl Write, table: &TableOp) -> fmt::Result {
    writeln!(
        out,
        "table {:.1},{:.1} {} columns {} rows",
        table.x(),
        table.y,
        table.columns.len(),
        table.body.len()
    )?;
    let header: Vec<String> = (0..table.columns.len()).map(|c| table.header.cell_text(c)).collect();
    writeln!(out, "  | {} |", header.join(" | "))?;
    for row in &table.body {
        let cells: Vec<String> = (0..table.columns.len()).map(|c| row.cell_text(c)).collect();
        writeln!(out, "  | {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Right => "right",
        Align::Center => "center",
    }
}
