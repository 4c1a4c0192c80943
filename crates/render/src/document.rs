//! Declarative page model.
//!
//! Layouts produce a [`Document`]: pages of draw instructions in top-left
//! millimetre coordinates. Backends turn it into bytes; tests inspect it
//! directly.

use revline_core::AssetKind;

use crate::metrics::{line_height, text_width};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A single line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub weight: FontWeight,
    pub size_pt: f32,
    pub align: Align,
}

impl TextOp {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            weight: FontWeight::Regular,
            size_pt: 10.0,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn size(mut self, size_pt: f32) -> Self {
        self.size_pt = size_pt;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(&self) -> f32 {
        text_width(&self.text, self.weight, self.size_pt)
    }

    /// X of the first glyph once alignment is resolved.
    pub fn left_x(&self) -> f32 {
        match self.align {
            Align::Left => self.x,
            Align::Right => self.x - self.width(),
            Align::Center => self.x - self.width() / 2.0,
        }
    }
}

/// An image placed in a box; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOp {
    pub asset: AssetKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0.0 (invisible) ..= 1.0 (opaque).
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectOp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Grey level of the fill (0 black, 1 white); `None` leaves it unfilled.
    pub fill: Option<f32>,
    pub stroke: bool,
}

impl RectOp {
    pub fn outline(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineOp {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub x: f32,
    pub width: f32,
    pub align: Align,
}

/// A laid-out table row: wrapped lines per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub cells: Vec<Vec<String>>,
    pub height: f32,
}

impl RowLayout {
    /// Cell text with wrapped lines joined by spaces.
    pub fn cell_text(&self, column: usize) -> String {
        self.cells
            .get(column)
            .map(|lines| lines.join(" ").trim().to_string())
            .unwrap_or_default()
    }
}

/// The part of a table that landed on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOp {
    pub y: f32,
    pub columns: Vec<ColumnLayout>,
    pub header: RowLayout,
    pub body: Vec<RowLayout>,
    pub font_size_pt: f32,
    pub padding: f32,
    pub header_fill: f32,
}

impl TableOp {
    pub fn x(&self) -> f32 {
        self.columns.first().map_or(0.0, |c| c.x)
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Y just below the last body row.
    pub fn end_y(&self) -> f32 {
        self.y + self.header.height + self.body.iter().map(|r| r.height).sum::<f32>()
    }

    /// Baseline of the `line`-th wrapped line in a row starting at `row_top`.
    pub fn baseline(&self, row_top: f32, line: usize) -> f32 {
        let lh = line_height(self.font_size_pt);
        row_top + self.padding + lh * (line as f32) + lh * 0.75
    }

    /// Top edge of each body row, in order.
    pub fn body_row_tops(&self) -> Vec<f32> {
        let mut top = self.y + self.header.height;
        self.body
            .iter()
            .map(|row| {
                let this = top;
                top += row.height;
                this
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Image(ImageOp),
    Rect(RectOp),
    Line(LineOp),
    Table(TableOp),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|p| p.ops.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableOp> {
        self.ops().filter_map(|op| match op {
            DrawOp::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageOp> {
        self.ops().filter_map(|op| match op {
            DrawOp::Image(i) => Some(i),
            _ => None,
        })
    }

    /// First text line starting with `prefix`.
    pub fn find_text(&self, prefix: &str) -> Option<&TextOp> {
        self.texts().find(|t| t.text.starts_with(prefix))
    }
}
