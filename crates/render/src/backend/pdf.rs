use std::collections::HashMap;
use std::io::BufWriter;

use printpdf::image_crate::{self, DynamicImage, GenericImageView, Rgb, RgbImage};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, Greyscale, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon,
};

use revline_core::{AssetKind, DocumentError, DocumentResult};

use super::{DocumentBackend, Rendered};
use crate::assets::AssetStore;
use crate::document::{Align, Document, DrawOp, FontWeight, ImageOp, LineOp, PageSize, RectOp, TableOp, TextOp};
use crate::metrics::text_width;

const IMAGE_DPI: f32 = 300.0;
const LINE_WIDTH_PT: f32 = 0.5;

/// Renders documents to PDF with the builtin Helvetica faces.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfBackend;

impl DocumentBackend for PdfBackend {
    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, document: &Document, assets: &AssetStore) -> DocumentResult<Rendered> {
        let size = document.page_size;
        let (doc, first_page, first_layer) =
            PdfDocument::new(&document.title, Mm(size.width), Mm(size.height), "Layer 1");

        let fonts = Fonts::load(&doc)?;
        let mut images = ImageCache::new(assets);
        let mut rendered = Rendered::default();

        for (index, page) in document.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = doc.add_page(Mm(size.width), Mm(size.height), "Layer 1");
                doc.get_page(p).get_layer(l)
            };
            let canvas = Canvas {
                layer,
                fonts: &fonts,
                size,
            };
            for op in &page.ops {
                match op {
                    DrawOp::Text(t) => canvas.text(t),
                    DrawOp::Rect(r) => canvas.rect(r),
                    DrawOp::Line(l) => canvas.line(l),
                    DrawOp::Table(t) => canvas.table(t),
                    DrawOp::Image(img) => match images.get(img.asset, img.opacity) {
                        Some(decoded) => canvas.image(img, decoded),
                        None => rendered.skip(img.asset),
                    },
                }
            }
        }

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| DocumentError::generation(format!("writing pdf: {e}")))?;
        rendered.bytes = writer
            .into_inner()
            .map_err(|e| DocumentError::generation(format!("flushing pdf: {e}")))?;
        Ok(rendered)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> DocumentResult<Self> {
        let load = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| DocumentError::generation(format!("loading builtin font: {e}")))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
        })
    }

    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Decoded images, faded per opacity. Each asset is decoded once per document.
struct ImageCache<'a> {
    assets: &'a AssetStore,
    decoded: HashMap<(AssetKind, u8), Option<DynamicImage>>,
}

impl<'a> ImageCache<'a> {
    fn new(assets: &'a AssetStore) -> Self {
        Self {
            assets,
            decoded: HashMap::new(),
        }
    }

    fn get(&mut self, asset: AssetKind, opacity: f32) -> Option<&DynamicImage> {
        let level = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        let assets = self.assets;
        self.decoded
            .entry((asset, level))
            .or_insert_with(|| decode(assets, asset, level))
            .as_ref()
    }
}

fn decode(assets: &AssetStore, asset: AssetKind, level: u8) -> Option<DynamicImage> {
    let bytes = assets.get(asset)?;
    match image_crate::load_from_memory(bytes) {
        Ok(img) => Some(flatten_onto_white(&img, level as f32 / 255.0)),
        Err(e) => {
            let err = DocumentError::asset(asset, e.to_string());
            tracing::warn!(asset = %asset, error = %err, "skipping undecodable image");
            None
        }
    }
}

/// Composite over a white page, scaling alpha by `opacity`.
///
/// PDF image XObjects here carry no soft mask, so transparency is baked in.
fn flatten_onto_white(img: &DynamicImage, opacity: f32) -> DynamicImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = px[3] as f32 / 255.0 * opacity;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    DynamicImage::ImageRgb8(out)
}

/// One PDF page, addressed in top-left millimetres.
struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    size: PageSize,
}

impl Canvas<'_> {
    fn flip(&self, y: f32) -> Mm {
        Mm(self.size.height - y)
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), self.flip(y))
    }

    fn ink(&self, grey: f32) {
        self.layer.set_fill_color(Color::Greyscale(Greyscale::new(grey, None)));
    }

    fn text(&self, t: &TextOp) {
        self.ink(0.0);
        self.layer
            .use_text(t.text.as_str(), t.size_pt, Mm(t.left_x()), self.flip(t.y), self.fonts.get(t.weight));
    }

    fn rect(&self, r: &RectOp) {
        let mode = match (r.fill, r.stroke) {
            (Some(_), true) => PaintMode::FillStroke,
            (Some(_), false) => PaintMode::Fill,
            (None, true) => PaintMode::Stroke,
            (None, false) => return,
        };
        if let Some(grey) = r.fill {
            self.ink(grey);
        }
        self.layer.set_outline_color(Color::Greyscale(Greyscale::new(0.0, None)));
        self.layer.set_outline_thickness(LINE_WIDTH_PT);
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                (self.point(r.x, r.y), false),
                (self.point(r.x + r.width, r.y), false),
                (self.point(r.x + r.width, r.y + r.height), false),
                (self.point(r.x, r.y + r.height), false),
            ]],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn line(&self, l: &LineOp) {
        self.layer.set_outline_color(Color::Greyscale(Greyscale::new(0.0, None)));
        self.layer.set_outline_thickness(LINE_WIDTH_PT);
        self.layer.add_line(Line {
            points: vec![(self.point(l.x1, l.y1), false), (self.point(l.x2, l.y2), false)],
            is_closed: false,
        });
    }

    fn image(&self, op: &ImageOp, img: &DynamicImage) {
        let natural_w = img.width() as f32 / IMAGE_DPI * 25.4;
        let natural_h = img.height() as f32 / IMAGE_DPI * 25.4;
        if natural_w <= 0.0 || natural_h <= 0.0 {
            return;
        }
        Image::from_dynamic_image(img).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(op.x)),
                translate_y: Some(self.flip(op.y + op.height)),
                scale_x: Some(op.width / natural_w),
                scale_y: Some(op.height / natural_h),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
    }

    fn table(&self, table: &TableOp) {
        self.rect(&RectOp {
            x: table.x(),
            y: table.y,
            width: table.width(),
            height: table.header.height,
            fill: Some(table.header_fill),
            stroke: false,
        });
        self.row(table, &table.header.cells, table.y, FontWeight::Bold);

        for (row, top) in table.body.iter().zip(table.body_row_tops()) {
            self.row(table, &row.cells, top, FontWeight::Regular);
            let bottom = top + row.height;
            self.line(&LineOp {
                x1: table.x(),
                y1: bottom,
                x2: table.x() + table.width(),
                y2: bottom,
            });
        }
    }

    fn row(&self, table: &TableOp, cells: &[Vec<String>], top: f32, weight: FontWeight) {
        self.ink(0.0);
        let font = self.fonts.get(weight);
        for (column, lines) in table.columns.iter().zip(cells) {
            for (i, line) in lines.iter().enumerate() {
                let width = text_width(line, weight, table.font_size_pt);
                let x = match column.align {
                    Align::Left => column.x + table.padding,
                    Align::Right => column.x + column.width - table.padding - width,
                    Align::Center => column.x + (column.width - width) / 2.0,
                };
                self.layer.use_text(
                    line.as_str(),
                    table.font_size_pt,
                    Mm(x),
                    self.flip(table.baseline(top, i)),
                    font,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_blends_toward_white() {
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])));
        let faded = flatten_onto_white(&black, 0.08).to_rgb8();
        let px = faded.get_pixel(0, 0);
        assert_eq!(px[0], 235);

        let opaque = flatten_onto_white(&black, 1.0).to_rgb8();
        assert_eq!(opaque.get_pixel(1, 1)[0], 0);
    }

    #[test]
    fn garbage_image_bytes_are_skipped() {
        let assets = AssetStore::empty().with_image(AssetKind::Logo, b"not an image".to_vec());
        let mut cache = ImageCache::new(&assets);
        assert!(cache.get(AssetKind::Logo, 1.0).is_none());
        assert!(cache.get(AssetKind::Watermark, 1.0).is_none());
    }
}
