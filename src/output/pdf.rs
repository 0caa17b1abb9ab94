//! PDF sink
//!
//! Replays a [`Page`] onto a single printpdf page. Page space is top-left
//! origin in points; PDF space is bottom-left origin, so every y is flipped.
//!
//! Output is byte-identical for identical input: dates come from the report
//! period and the trailer `/ID`, which printpdf fills with random characters,
//! is overwritten in place with an id derived from the metadata.

use std::io::{BufWriter, Write};

use chrono::NaiveDate;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Polygon};
use time::OffsetDateTime;

use crate::build_info::BuildStamp;
use crate::render::geometry::{circle_outline, rounded_rect_outline, wedge_outline};
use crate::render::{DrawCommand, FontSpec, FontStyle, Page, Point, Rgb, Stroke};

use super::error::{ReportError, ReportResult};

const PT_PER_MM: f32 = 2.834645669;
/// Length of each trailer `/ID` string printpdf writes
const TRAILER_ID_LEN: usize = 32;

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt / PT_PER_MM)
}

fn to_printpdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.fractions();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Metadata stamped into the document info dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    pub title: String,
    /// Used for the creation and modification dates so output does not
    /// depend on the wall clock
    pub document_date: NaiveDate,
    /// Producer field, the running build by default
    pub producer: String,
}

impl PdfMetadata {
    pub fn new(title: &str, document_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            document_date,
            producer: BuildStamp::current().producer(),
        }
    }

    pub fn with_producer(mut self, producer: &str) -> Self {
        self.producer = producer.to_string();
        self
    }

    fn timestamp(&self) -> OffsetDateTime {
        let days = self.document_date.signed_duration_since(NaiveDate::default()).num_days();
        OffsetDateTime::from_unix_timestamp(days * 86_400).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    fn document_id(&self) -> String {
        format!("wellness-report-{}", self.document_date.format("%Y%m%d"))
    }

    /// Uppercase title characters padded with `0`, then the date as
    /// `YYYYMMDD`; always 32 ASCII bytes
    fn trailer_id(&self) -> [u8; TRAILER_ID_LEN] {
        let date = self.document_date.format("%Y%m%d").to_string();
        let mut id = [b'0'; TRAILER_ID_LEN];
        let name_len = TRAILER_ID_LEN - date.len();
        let name = self
            .title
            .bytes()
            .filter(u8::is_ascii_alphanumeric)
            .map(|b| b.to_ascii_uppercase())
            .take(name_len);
        for (slot, b) in id.iter_mut().zip(name) {
            *slot = b;
        }
        for (slot, b) in id[name_len..].iter_mut().zip(date.bytes()) {
            *slot = b;
        }
        id
    }
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn find_from(haystack: &[u8], needle: u8, from: usize) -> Option<usize> {
    haystack.get(from..)?.iter().position(|b| *b == needle).map(|p| p + from)
}

/// Overwrite both strings of the last `/ID [(..) (..)]` entry with `id`.
///
/// The replacement has the same length, so xref offsets stay valid.
/// Returns false and leaves `bytes` untouched when no such entry exists.
fn stamp_trailer_id(bytes: &mut [u8], id: &[u8; TRAILER_ID_LEN]) -> bool {
    let Some(key) = rfind(bytes, b"/ID") else {
        return false;
    };
    let Some(open_array) = find_from(bytes, b'[', key) else {
        return false;
    };
    let mut spans = [0usize; 2];
    let mut cursor = open_array;
    for span in spans.iter_mut() {
        let Some(open) = find_from(bytes, b'(', cursor) else {
            return false;
        };
        let close = open + 1 + TRAILER_ID_LEN;
        if bytes.get(close) != Some(&b')') {
            return false;
        }
        *span = open + 1;
        cursor = close + 1;
    }
    for start in spans {
        bytes[start..start + TRAILER_ID_LEN].copy_from_slice(id);
    }
    true
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, font: FontSpec) -> &IndirectFontRef {
        match font.style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

struct PdfCanvas {
    layer: PdfLayerReference,
    fonts: Fonts,
    page_height: f32,
}

impl PdfCanvas {
    fn point(&self, p: Point) -> printpdf::Point {
        printpdf::Point::new(pt_to_mm(p.x), pt_to_mm(self.page_height - p.y))
    }

    fn ring(&self, points: &[Point]) -> Vec<(printpdf::Point, bool)> {
        points.iter().map(|p| (self.point(*p), false)).collect()
    }

    fn shape(&self, points: &[Point], fill: Option<Rgb>, stroke: Option<Stroke>) {
        if points.len() < 3 {
            return;
        }
        let mode = match (fill, stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };
        if let Some(color) = fill {
            self.layer.set_fill_color(to_printpdf_color(color));
        }
        if let Some(stroke) = stroke {
            self.layer.set_outline_color(to_printpdf_color(stroke.color));
            self.layer.set_outline_thickness(stroke.width);
        }
        self.layer.add_polygon(Polygon {
            rings: vec![self.ring(points)],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn polyline(&self, points: &[Point], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(to_printpdf_color(stroke.color));
        self.layer.set_outline_thickness(stroke.width);
        self.layer.add_line(Line {
            points: self.ring(points),
            is_closed: false,
        });
    }

    fn text(&self, text: &str, origin: Point, font: FontSpec, color: Rgb) {
        self.layer.set_fill_color(to_printpdf_color(color));
        self.layer.use_text(
            text,
            font.size,
            pt_to_mm(origin.x),
            pt_to_mm(self.page_height - origin.y),
            self.fonts.pick(font),
        );
    }

    fn replay(&self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { rect, corner_radius, fill, stroke } => {
                self.shape(&rounded_rect_outline(rect, *corner_radius), *fill, *stroke);
            }
            DrawCommand::Circle { center, radius, fill } => {
                self.shape(&circle_outline(*center, *radius), Some(*fill), None);
            }
            DrawCommand::Wedge { center, radius, start_deg, sweep_deg, fill } => {
                self.shape(&wedge_outline(*center, *radius, *start_deg, *sweep_deg), Some(*fill), None);
            }
            DrawCommand::Polygon { points, fill } => self.shape(points, Some(*fill), None),
            DrawCommand::Polyline { points, stroke } => self.polyline(points, *stroke),
            DrawCommand::Text { text, origin, font, color, .. } => self.text(text, *origin, *font, *color),
        }
    }
}

/// Encode a page as a single-page PDF using the built-in Helvetica family
pub fn render_pdf(page: &Page, metadata: &PdfMetadata) -> ReportResult<Vec<u8>> {
    let (doc, page_index, layer_index) = PdfDocument::new(
        &metadata.title,
        pt_to_mm(page.width),
        pt_to_mm(page.height),
        "Report",
    );
    let stamp = metadata.timestamp();
    let doc = doc
        .with_document_id(metadata.document_id())
        .with_creation_date(stamp)
        .with_mod_date(stamp)
        .with_producer(metadata.producer.as_str());

    let font = |builtin: BuiltinFont| doc.add_builtin_font(builtin).map_err(|e| ReportError::Pdf(e.to_string()));
    let fonts = Fonts {
        regular: font(BuiltinFont::Helvetica)?,
        bold: font(BuiltinFont::HelveticaBold)?,
        italic: font(BuiltinFont::HelveticaOblique)?,
    };

    let canvas = PdfCanvas {
        layer: doc.get_page(page_index).get_layer(layer_index),
        fonts,
        page_height: page.height,
    };
    for command in &page.commands {
        canvas.replay(command);
    }
    tracing::debug!(commands = page.commands.len(), "PDF page replayed");

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer).map_err(|e| ReportError::Pdf(e.to_string()))?;
        writer.flush()?;
    }
    if !stamp_trailer_id(&mut bytes, &metadata.trailer_id()) {
        tracing::warn!("PDF trailer has no /ID entry to stamp");
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_timestamp_is_midnight_utc() {
        let metadata = PdfMetadata::new("Report", NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        assert_eq!(metadata.timestamp().unix_timestamp(), 86_400);
        assert_eq!(metadata.document_id(), "wellness-report-19700102");
    }

    #[test]
    fn test_trailer_id_is_title_then_date() {
        let metadata = PdfMetadata::new("Wellness Report - Sam", NaiveDate::from_ymd_opt(2026, 9, 14).unwrap());
        assert_eq!(&metadata.trailer_id(), b"WELLNESSREPORTSAM000000020260914");

        let long = PdfMetadata::new(&"x".repeat(40), NaiveDate::from_ymd_opt(2026, 9, 14).unwrap());
        assert_eq!(&long.trailer_id(), b"XXXXXXXXXXXXXXXXXXXXXXXX20260914");
    }

    #[test]
    fn test_stamp_replaces_both_trailer_strings() {
        let id = [b'A'; TRAILER_ID_LEN];
        let random_a = "HEIGIDGCBAAHFGBHAEFHCBHGAJHCJDHF";
        let random_b = "HCJEJEGHBAFICDFFBJIDBAIBJGDADAGJ";
        let trailer = format!("trailer\n<</Root 1 0 R/ID[({})({})]>>\nstartxref\n42\n%%EOF", random_a, random_b);
        let mut bytes = trailer.clone().into_bytes();

        assert!(stamp_trailer_id(&mut bytes, &id));
        let stamped = String::from_utf8(bytes).unwrap();
        let ids = "A".repeat(TRAILER_ID_LEN);
        assert_eq!(stamped, trailer.replace(random_a, &ids).replace(random_b, &ids));
        assert_eq!(stamped.len(), trailer.len());
    }

    #[test]
    fn test_stamp_leaves_unexpected_trailers_alone() {
        let id = [b'A'; TRAILER_ID_LEN];
        let mut no_id = b"trailer <</Root 1 0 R>>".to_vec();
        assert!(!stamp_trailer_id(&mut no_id, &id));
        assert_eq!(no_id, b"trailer <</Root 1 0 R>>".to_vec());

        let mut short = b"/ID[(ABC)(DEF)]".to_vec();
        assert!(!stamp_trailer_id(&mut short, &id));
        assert_eq!(short, b"/ID[(ABC)(DEF)]".to_vec());
    }

    #[test]
    fn test_same_page_gives_identical_bytes() {
        let page = Page {
            width: 612.0,
            height: 792.0,
            commands: vec![DrawCommand::Circle {
                center: Point::new(100.0, 100.0),
                radius: 20.0,
                fill: Rgb(0, 176, 80),
            }],
        };
        let metadata = PdfMetadata::new("Wellness Report - Sam", NaiveDate::from_ymd_opt(2026, 9, 14).unwrap())
            .with_producer("wellness-report test");
        let first = render_pdf(&page, &metadata).unwrap();
        let second = render_pdf(&page, &metadata).unwrap();
        assert_eq!(first, second);
        assert!(first
            .windows(TRAILER_ID_LEN)
            .any(|w| w == &metadata.trailer_id()[..]));
    }

    #[test]
    fn test_empty_page_is_a_pdf() {
        let page = Page {
            width: 612.0,
            height: 792.0,
            commands: Vec::new(),
        };
        let bytes = render_pdf(&page, &PdfMetadata::new("Report", NaiveDate::from_ymd_opt(2026, 9, 14).unwrap())).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let (doc, page_index, layer_index) = PdfDocument::new("t", Mm(100.0), Mm(100.0), "l");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
        let canvas = PdfCanvas {
            layer: doc.get_page(page_index).get_layer(layer_index),
            fonts: Fonts {
                regular: font.clone(),
                bold: font.clone(),
                italic: font,
            },
            page_height: 792.0,
        };
        let top_left = canvas.point(Point::new(0.0, 0.0));
        assert!((top_left.y.0 - 792.0).abs() < 1e-2);
        let bottom = canvas.point(Point::new(72.0, 792.0));
        assert!(bottom.y.0.abs() < 1e-2);
        assert!((bottom.x.0 - 72.0).abs() < 1e-2);
    }
}
