//! Page-by-page document assembly.

use crate::document::{DrawOp, Document, LineOp, Page, PageSize, RectOp, TableOp, TextOp};
use crate::table::TableSpec;

/// Space kept free below tables before they continue on the next page.
pub const BOTTOM_MARGIN: f32 = 14.0;

/// Where a table resumes on a continuation page.
pub const CONTINUATION_Y: f32 = 20.0;

pub struct DocumentBuilder {
    title: String,
    page_size: PageSize,
    background: Vec<DrawOp>,
    pages: Vec<Page>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            title: title.into(),
            page_size,
            background: Vec::new(),
            pages: vec![Page::default()],
        }
    }

    /// Ops repeated underneath everything else on every page.
    ///
    /// Must be set before anything is drawn.
    pub fn with_background(mut self, ops: Vec<DrawOp>) -> Self {
        self.background = ops;
        for page in &mut self.pages {
            if page.ops.is_empty() {
                page.ops = self.background.clone();
            }
        }
        self
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn push(&mut self, op: DrawOp) -> &mut Self {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
        self
    }

    pub fn text(&mut self, op: TextOp) -> &mut Self {
        self.push(DrawOp::Text(op))
    }

    pub fn rect(&mut self, op: RectOp) -> &mut Self {
        self.push(DrawOp::Rect(op))
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.push(DrawOp::Line(LineOp { x1, y1, x2, y2 }))
    }

    pub fn new_page(&mut self) -> &mut Self {
        self.pages.push(Page {
            ops: self.background.clone(),
        });
        self
    }

    /// Place a table at `start_y`, spilling rows onto new pages as needed.
    ///
    /// The header is repeated on every page the table touches. Returns the Y
    /// just below the last row, on the (then) current page.
    pub fn table(&mut self, spec: &TableSpec, start_y: f32) -> f32 {
        let columns = spec.column_layouts();
        let header = spec.layout_header();
        let limit = self.page_size.height - BOTTOM_MARGIN;

        let segment = |y: f32, body: Vec<_>| TableOp {
            y,
            columns: columns.clone(),
            header: header.clone(),
            body,
            font_size_pt: spec.style.font_size_pt,
            padding: spec.style.padding,
            header_fill: spec.style.header_fill,
        };

        let mut y = start_y;
        let mut body = Vec::new();
        let mut cursor = y + header.height;

        for row in spec.layout_body() {
            let fits = cursor + row.height <= limit;
            if !fits {
                let fresh_page = y <= CONTINUATION_Y && body.is_empty();
                if !fresh_page {
                    let done = std::mem::take(&mut body);
                    if !done.is_empty() {
                        self.push(DrawOp::Table(segment(y, done)));
                    }
                    tracing::debug!(page = self.pages.len() + 1, "table continues on new page");
                    self.new_page();
                    y = CONTINUATION_Y;
                    cursor = y + header.height;
                }
            }
            cursor += row.height;
            body.push(row);
        }

        let last = segment(y, body);
        let end = last.end_y();
        self.push(DrawOp::Table(last));
        end
    }

    pub fn finish(self) -> Document {
        Document {
            title: self.title,
            page_size: self.page_size,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn spec(rows: usize) -> TableSpec {
        let mut spec = TableSpec::new(14.0, vec![Column::new("Name", 100.0), Column::new("Price", 40.0)]);
        for i in 0..rows {
            spec.row(vec![format!("Item {i}"), "RM1.00".into()]);
        }
        spec
    }

    #[test]
    fn short_table_stays_on_first_page() {
        let mut builder = DocumentBuilder::new("t", PageSize::A4);
        let end = builder.table(&spec(3), 70.0);
        let doc = builder.finish();
        assert_eq!(doc.pages.len(), 1);
        let table = doc.tables().next().unwrap();
        assert_eq!(table.body.len(), 3);
        assert_eq!(end, table.end_y());
    }

    #[test]
    fn long_table_repeats_header_on_continuation_page() {
        let mut builder = DocumentBuilder::new("t", PageSize::A4);
        builder.table(&spec(40), 70.0);
        let doc = builder.finish();
        assert!(doc.pages.len() >= 2);

        let segments: Vec<_> = doc.tables().collect();
        assert_eq!(segments.len(), doc.pages.len());
        assert_eq!(segments.iter().map(|s| s.body.len()).sum::<usize>(), 40);
        assert_eq!(segments[1].y, CONTINUATION_Y);
        assert_eq!(segments[1].header, segments[0].header);
        for s in &segments {
            assert!(s.end_y() <= PageSize::A4.height - BOTTOM_MARGIN);
        }
    }

    #[test]
    fn empty_table_is_header_only() {
        let mut builder = DocumentBuilder::new("t", PageSize::A4);
        let end = builder.table(&spec(0), 70.0);
        let doc = builder.finish();
        let table = doc.tables().next().unwrap();
        assert!(table.body.is_empty());
        assert_eq!(end, 70.0 + table.header.height);
    }

    #[test]
    fn background_is_stamped_first_on_every_page() {
        let marker = DrawOp::Line(LineOp {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        });
        let mut builder = DocumentBuilder::new("t", PageSize::A4).with_background(vec![marker.clone()]);
        builder.text(TextOp::new(14.0, 20.0, "hello"));
        builder.new_page();
        builder.text(TextOp::new(14.0, 20.0, "again"));
        let doc = builder.finish();
        for page in &doc.pages {
            assert_eq!(page.ops[0], marker);
        }
    }
}
