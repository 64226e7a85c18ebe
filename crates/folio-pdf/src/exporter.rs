//! Document to PDF serialization.
//!
//! Walks every page in order and every element in paint order, mapping each
//! variant to printpdf primitives. Page geometry comes from the same
//! [`resolve_page_size`] used for on-screen sizing, so exported pages match
//! the canvas exactly.
//!
//! Fidelity notes: tables render their border, grid rules and cell text but
//! no per-cell styling; charts, forms, code blocks and codes render as
//! labeled placeholder boxes until a backend fills them in. Of the shared
//! meta fields only `visible` is honored: `rotation` and `opacity` would
//! need a transform matrix and an extended graphics state per element, and
//! elements carrying them export upright and fully opaque. All of this goes
//! through the same dispatch so adding full support never restructures the
//! walk.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use folio_core::elements::{
    Color, Divider, DividerStyle, Drawing, Element, FitMode, FontFace, FontFamily, HeaderMode,
    Shape, ShapeKind, Table, Text, TextAlign,
};
use folio_core::Document;
use kurbo::Point;
use printpdf::{
    calculate_points_for_circle, BuiltinFont, Color as PdfColor, ImageTransform, IndirectFontRef,
    Line, LineDashPattern, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Pt, Rgb,
};

use crate::error::{ExportError, ExportResult};
use crate::metrics;

const PLACEHOLDER_FILL: Color = Color {
    r: 245,
    g: 245,
    b: 245,
    a: 255,
};
const PLACEHOLDER_BORDER: Color = Color {
    r: 153,
    g: 153,
    b: 153,
    a: 255,
};
const TABLE_FONT_SIZE: f64 = 10.0;
const LINE_SPACING: f64 = 1.2;

/// Build `${sanitized_title}.pdf`: every whitespace character becomes an
/// underscore, an empty title falls back to "document".
pub fn output_file_name(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return "document.pdf".into();
    }
    let sanitized: String = trimmed
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{sanitized}.pdf")
}

/// Serializes a [`Document`] into a PDF.
///
/// Reduced fidelity relative to screen rendering: tables draw border, grid
/// and cell text only, and element `rotation`/`opacity` are not applied
/// (hidden elements are skipped). See the module docs for the full list.
#[derive(Debug, Default)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export the whole document to PDF bytes.
    ///
    /// # Errors
    ///
    /// Any backend failure aborts the export with no partial artifact.
    /// Per-element image failures are logged and skipped instead.
    pub fn export(&self, document: &Document) -> ExportResult<Vec<u8>> {
        let size = document.page_dimensions();
        let (doc, first_page, first_layer) = PdfDocument::new(
            &document.title,
            mm(size.width),
            mm(size.height),
            "Layer 1",
        );
        let fonts = Fonts::load(&doc)?;

        for (index, page) in document.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) =
                    doc.add_page(mm(size.width), mm(size.height), "Layer 1");
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            let ctx = PageCtx {
                layer,
                height: size.height,
                fonts: &fonts,
            };
            for element in &page.elements {
                if !element.meta().visible {
                    continue;
                }
                render_element(element, &ctx);
            }
        }

        doc.save_to_bytes()
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }

    /// Export into `dir`, named from the sanitized document title.
    /// Returns the written path.
    pub fn export_to_file(&self, document: &Document, dir: &Path) -> ExportResult<PathBuf> {
        let bytes = self.export(document)?;
        let path = dir.join(output_file_name(&document.title));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// The builtin faces, loaded once per export.
struct Fonts {
    helvetica: [IndirectFontRef; 4],
    times: [IndirectFontRef; 4],
    courier: [IndirectFontRef; 4],
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> ExportResult<Self> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| ExportError::Font(e.to_string()))
        };
        Ok(Self {
            helvetica: [
                add(BuiltinFont::Helvetica)?,
                add(BuiltinFont::HelveticaBold)?,
                add(BuiltinFont::HelveticaOblique)?,
                add(BuiltinFont::HelveticaBoldOblique)?,
            ],
            times: [
                add(BuiltinFont::TimesRoman)?,
                add(BuiltinFont::TimesBold)?,
                add(BuiltinFont::TimesItalic)?,
                add(BuiltinFont::TimesBoldItalic)?,
            ],
            courier: [
                add(BuiltinFont::Courier)?,
                add(BuiltinFont::CourierBold)?,
                add(BuiltinFont::CourierOblique)?,
                add(BuiltinFont::CourierBoldOblique)?,
            ],
        })
    }

    fn resolve(&self, family: FontFamily, face: FontFace) -> &IndirectFontRef {
        let set = match family {
            FontFamily::Helvetica => &self.helvetica,
            FontFamily::Times => &self.times,
            FontFamily::Courier => &self.courier,
        };
        let index = match face {
            FontFace::Normal => 0,
            FontFace::Bold => 1,
            FontFace::Italic => 2,
            FontFace::BoldItalic => 3,
        };
        &set[index]
    }
}

struct PageCtx<'a> {
    layer: PdfLayerReference,
    /// Page height in points, for flipping top-down y into PDF space.
    height: f64,
    fonts: &'a Fonts,
}

impl PageCtx<'_> {
    /// Convert a top-down page point to a PDF-space point.
    fn point(&self, x: f64, y: f64) -> printpdf::Point {
        printpdf::Point::new(mm(x), mm(self.height - y))
    }

    fn rect_points(&self, x: f64, y: f64, w: f64, h: f64) -> Vec<(printpdf::Point, bool)> {
        vec![
            (self.point(x, y), false),
            (self.point(x + w, y), false),
            (self.point(x + w, y + h), false),
            (self.point(x, y + h), false),
        ]
    }

    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        if color.is_transparent() {
            return;
        }
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_shape(Line {
            points: self.rect_points(x, y, w, h),
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });
    }

    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64, color: Color, thickness: f64) {
        if color.is_transparent() || thickness <= 0.0 {
            return;
        }
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_shape(Line {
            points: self.rect_points(x, y, w, h),
            is_closed: true,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn stroke_segment(&self, from: Point, to: Point, color: Color, thickness: f64) {
        if color.is_transparent() || thickness <= 0.0 {
            return;
        }
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_shape(Line {
            points: vec![
                (self.point(from.x, from.y), false),
                (self.point(to.x, to.y), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    /// Emit a single line of text with its baseline at top-down `y`.
    fn text_line(
        &self,
        line: &str,
        x: f64,
        baseline: f64,
        font_size: f64,
        font: &IndirectFontRef,
        color: Color,
    ) {
        if line.is_empty() {
            return;
        }
        self.layer.set_fill_color(pdf_color(color));
        self.layer
            .use_text(line, font_size, mm(x), mm(self.height - baseline), font);
    }
}

fn mm(points: f64) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        f64::from(color.r) / 255.0,
        f64::from(color.g) / 255.0,
        f64::from(color.b) / 255.0,
        None,
    ))
}

/// The single dispatch site covering every element variant.
fn render_element(element: &Element, ctx: &PageCtx) {
    match element {
        Element::Text(text) => render_text(text, ctx),
        Element::Shape(shape) => render_shape(shape, ctx),
        Element::Table(table) => render_table(table, ctx),
        Element::Drawing(drawing) => render_drawing(drawing, ctx),
        Element::Image(image) => {
            if let Err(reason) = place_image(
                &image.src,
                image.position,
                image.width,
                image.height,
                image.fit,
                ctx,
            ) {
                log::warn!("skipping image {}: {reason}", element.id());
            }
        }
        Element::Divider(divider) => render_divider(divider, ctx),
        Element::Signature(signature) => match &signature.image {
            Some(uri) => {
                if let Err(reason) = place_image(
                    uri,
                    signature.position,
                    signature.width,
                    signature.height,
                    FitMode::Contain,
                    ctx,
                ) {
                    log::warn!("skipping signature image {}: {reason}", element.id());
                }
            }
            None => placeholder(ctx, signature.position, signature.width, signature.height, "Signature"),
        },
        Element::Chart(chart) => {
            let label = format!("{} chart", chart.kind.label());
            placeholder(ctx, chart.position, chart.width, chart.height, &label);
        }
        Element::Form(form) => {
            let label = if form.label.is_empty() {
                "Form field".to_string()
            } else {
                form.label.clone()
            };
            placeholder(ctx, form.position, form.width, form.height, &label);
        }
        Element::Code(code) => {
            placeholder(ctx, code.position, code.width, code.height, "Code block");
        }
        Element::QrCode(qr) => {
            placeholder(ctx, qr.position, qr.width, qr.height, "QR code");
        }
        Element::Barcode(barcode) => {
            placeholder(ctx, barcode.position, barcode.width, barcode.height, "Barcode");
        }
    }
}

fn render_text(text: &Text, ctx: &PageCtx) {
    let face = text.face();
    let bold = matches!(face, FontFace::Bold | FontFace::BoldItalic);
    let font = ctx.fonts.resolve(text.font_family, face);
    let lines = metrics::wrap_text(&text.content, text.width, text.font_size, bold);
    let leading = text.font_size * LINE_SPACING;

    for (i, line) in lines.iter().enumerate() {
        let line_width = metrics::text_width(line, text.font_size, bold);
        let x = match text.align {
            TextAlign::Left => text.position.x,
            TextAlign::Center => text.position.x + (text.width - line_width) / 2.0,
            TextAlign::Right => text.position.x + text.width - line_width,
        };
        // Baseline anchors at y + fontSize; no vertical centering.
        let baseline = text.position.y + text.font_size + i as f64 * leading;
        ctx.text_line(line, x, baseline, text.font_size, font, text.color);
    }
}

fn render_shape(shape: &Shape, ctx: &PageCtx) {
    match shape.kind {
        ShapeKind::Rectangle => {
            // Fill then stroke as two separate paint operations.
            ctx.fill_rect(
                shape.position.x,
                shape.position.y,
                shape.width,
                shape.height,
                shape.fill,
            );
            ctx.stroke_rect(
                shape.position.x,
                shape.position.y,
                shape.width,
                shape.height,
                shape.stroke,
                shape.stroke_width,
            );
        }
        ShapeKind::Circle => {
            let center = shape.center();
            let points = calculate_points_for_circle(
                Pt(shape.radius()),
                Pt(center.x),
                Pt(ctx.height - center.y),
            );
            if !shape.fill.is_transparent() {
                ctx.layer.set_fill_color(pdf_color(shape.fill));
                ctx.layer.add_shape(Line {
                    points: points.clone(),
                    is_closed: true,
                    has_fill: true,
                    has_stroke: false,
                    is_clipping_path: false,
                });
            }
            if !shape.stroke.is_transparent() && shape.stroke_width > 0.0 {
                ctx.layer.set_outline_color(pdf_color(shape.stroke));
                ctx.layer.set_outline_thickness(shape.stroke_width);
                ctx.layer.add_shape(Line {
                    points,
                    is_closed: true,
                    has_fill: false,
                    has_stroke: true,
                    is_clipping_path: false,
                });
            }
        }
        ShapeKind::Line => {
            let from = shape.position;
            let to = Point::new(shape.position.x + shape.width, shape.position.y);
            ctx.stroke_segment(from, to, shape.stroke, shape.stroke_width);
        }
    }
}

fn render_table(table: &Table, ctx: &PageCtx) {
    let x = table.position.x;
    let y = table.position.y;
    let header_rows = match table.header_mode {
        HeaderMode::None => 0,
        HeaderMode::Row => 1,
    };
    let total_rows = table.rows + header_rows;
    if total_rows == 0 || table.columns == 0 {
        ctx.stroke_rect(x, y, table.width, table.height, table.border_color, 1.0);
        return;
    }
    let row_h = table.height / total_rows as f64;
    let col_w = table.width / table.columns as f64;

    if header_rows == 1 {
        ctx.fill_rect(x, y, table.width, row_h, table.header_color);
    }

    ctx.stroke_rect(x, y, table.width, table.height, table.border_color, 1.0);
    for row in 1..total_rows {
        let ry = y + row as f64 * row_h;
        ctx.stroke_segment(
            Point::new(x, ry),
            Point::new(x + table.width, ry),
            table.border_color,
            0.5,
        );
    }
    for col in 1..table.columns {
        let cx = x + col as f64 * col_w;
        ctx.stroke_segment(
            Point::new(cx, y),
            Point::new(cx, y + table.height),
            table.border_color,
            0.5,
        );
    }

    let body_font = ctx.fonts.resolve(FontFamily::Helvetica, FontFace::Normal);
    let header_font = ctx.fonts.resolve(FontFamily::Helvetica, FontFace::Bold);
    let pad = 4.0;

    for visual_row in 0..total_rows {
        let row_top = y + visual_row as f64 * row_h;
        let baseline = row_top + row_h / 2.0 + TABLE_FONT_SIZE / 2.0 - 1.5;
        let is_header = header_rows == 1 && visual_row == 0;
        for col in 0..table.columns {
            let value = if is_header {
                table.data.headers.get(col)
            } else {
                table
                    .data
                    .rows
                    .get(visual_row - header_rows)
                    .and_then(|r| r.get(col))
            };
            let Some(value) = value else { continue };
            if value.is_empty() {
                continue;
            }
            let font = if is_header { header_font } else { body_font };
            ctx.text_line(
                value,
                x + col as f64 * col_w + pad,
                baseline,
                TABLE_FONT_SIZE,
                font,
                Color::black(),
            );
        }
    }
}

fn render_drawing(drawing: &Drawing, ctx: &PageCtx) {
    if drawing.points.len() < 2 || drawing.color.is_transparent() {
        return;
    }
    ctx.layer.set_outline_color(pdf_color(drawing.color));
    ctx.layer.set_outline_thickness(drawing.stroke_width);
    ctx.layer.add_shape(Line {
        points: drawing
            .points
            .iter()
            .map(|p| (ctx.point(p.x, p.y), false))
            .collect(),
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    });
}

fn render_divider(divider: &Divider, ctx: &PageCtx) {
    let y = divider.position.y + divider.height / 2.0;
    let dash = match divider.style {
        DividerStyle::Solid => LineDashPattern::default(),
        DividerStyle::Dashed => LineDashPattern {
            dash_1: Some(6),
            gap_1: Some(4),
            ..LineDashPattern::default()
        },
        DividerStyle::Dotted => LineDashPattern {
            dash_1: Some(1),
            gap_1: Some(3),
            ..LineDashPattern::default()
        },
    };
    ctx.layer.set_line_dash_pattern(dash);
    ctx.stroke_segment(
        Point::new(divider.position.x, y),
        Point::new(divider.position.x + divider.width, y),
        divider.color,
        divider.thickness,
    );
    ctx.layer.set_line_dash_pattern(LineDashPattern::default());
}

/// Labeled gray box for variants without full export support yet.
fn placeholder(ctx: &PageCtx, position: Point, width: f64, height: f64, label: &str) {
    ctx.fill_rect(position.x, position.y, width, height, PLACEHOLDER_FILL);
    ctx.stroke_rect(position.x, position.y, width, height, PLACEHOLDER_BORDER, 1.0);

    let font_size = 12.0;
    let label_width = metrics::text_width(label, font_size, false);
    let x = position.x + (width - label_width).max(0.0) / 2.0;
    let baseline = position.y + height / 2.0 + font_size / 2.0 - 1.5;
    let font = ctx.fonts.resolve(FontFamily::Helvetica, FontFace::Normal);
    ctx.text_line(
        label,
        x,
        baseline,
        font_size,
        font,
        Color::new(102, 102, 102, 255),
    );
}

/// Decode a `data:` URI and place the image into the element box.
///
/// `Contain` letterboxes inside the box; `Cover` would need a clipping
/// path, so it stretches like `Fill`.
fn place_image(
    src: &str,
    position: Point,
    width: f64,
    height: f64,
    fit: FitMode,
    ctx: &PageCtx,
) -> Result<(), String> {
    let bytes = decode_data_uri(src)?;
    let dynamic = printpdf::image_crate::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let (px_w, px_h) = (dynamic.width().max(1), dynamic.height().max(1));
    let image = printpdf::Image::from_dynamic_image(&dynamic);

    // Native render size in points at `dpi`; scale maps it onto the box.
    let dpi = 96.0;
    let native_w = f64::from(px_w) * 72.0 / dpi;
    let native_h = f64::from(px_h) * 72.0 / dpi;
    let (scale_x, scale_y) = match fit {
        FitMode::Contain => {
            let uniform = (width / native_w).min(height / native_h);
            (uniform, uniform)
        }
        FitMode::Fill | FitMode::Cover => (width / native_w, height / native_h),
    };
    let render_w = native_w * scale_x;
    let render_h = native_h * scale_y;

    // Letterboxed images center inside the box; the offsets are zero for Fill.
    let x = position.x + (width - render_w) / 2.0;
    let y_bottom = ctx.height - position.y - height + (height - render_h) / 2.0;

    image.add_to_layer(
        ctx.layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y_bottom)),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    Ok(())
}

fn decode_data_uri(src: &str) -> Result<Vec<u8>, String> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URI".to_string())?;
    let (_, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| "missing base64 payload".to_string())?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| e.to_string())
}
