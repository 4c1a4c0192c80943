use crate::document::{Align, ColumnLayout, FontWeight, RowLayout};
use crate::metrics::{line_height, wrap_text};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f32) -> Self {
        Self {
            header: header.into(),
            width,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableStyle {
    pub font_size_pt: f32,
    pub padding: f32,
    pub header_fill: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size_pt: 10.0,
            padding: 4.0,
            header_fill: 0.94,
        }
    }
}

/// Unpositioned table content: columns plus plain-text rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub x: f32,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
}

impl TableSpec {
    pub fn new(x: f32, columns: Vec<Column>) -> Self {
        Self {
            x,
            columns,
            rows: Vec::new(),
            style: TableStyle::default(),
        }
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn column_layouts(&self) -> Vec<ColumnLayout> {
        let mut x = self.x;
        self.columns
            .iter()
            .map(|c| {
                let layout = ColumnLayout {
                    x,
                    width: c.width,
                    align: c.align,
                };
                x += c.width;
                layout
            })
            .collect()
    }

    pub fn layout_header(&self) -> RowLayout {
        let cells: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        self.layout_row(&cells, FontWeight::Bold)
    }

    pub fn layout_body(&self) -> Vec<RowLayout> {
        self.rows
            .iter()
            .map(|cells| self.layout_row(cells, FontWeight::Regular))
            .collect()
    }

    fn layout_row(&self, cells: &[String], weight: FontWeight) -> RowLayout {
        let size = self.style.font_size_pt;
        let wrapped: Vec<Vec<String>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let text = cells.get(i).map(String::as_str).unwrap_or("");
                let inner = (column.width - 2.0 * self.style.padding).max(1.0);
                wrap_text(text, weight, size, inner)
            })
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
        RowLayout {
            cells: wrapped,
            height: lines as f32 * line_height(size) + 2.0 * self.style.padding,
        }
    }
}
