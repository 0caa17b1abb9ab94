//! PNG preview sink
//!
//! Rasterizes a [`Page`] with plotters into an RGB buffer and encodes it as
//! PNG. Text is drawn as a light bar of its measured width, which keeps the
//! preview independent of installed fonts while still showing where every
//! label sits.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;

use crate::render::geometry::{circle_outline, rounded_rect_outline, wedge_outline};
use crate::render::{DrawCommand, Page, Point, Rgb};

use super::error::{ReportError, ReportResult};

/// Default preview resolution in pixels per point
pub const DEFAULT_PREVIEW_SCALE: f32 = 1.0;
const MAX_PREVIEW_SCALE: f32 = 4.0;
/// 64 megapixels, far above a letter page at the maximum scale
const MAX_PREVIEW_PIXELS: usize = 64 * 1024 * 1024;
/// Opacity of the bar standing in for a line of text
const TEXT_BAR_ALPHA: f32 = 0.45;

fn preview_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Preview(e.to_string())
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

struct Raster {
    scale: f32,
}

impl Raster {
    fn pixel(&self, p: Point) -> (i32, i32) {
        ((p.x * self.scale).round() as i32, (p.y * self.scale).round() as i32)
    }

    fn pixels(&self, points: &[Point]) -> Vec<(i32, i32)> {
        points.iter().map(|p| self.pixel(*p)).collect()
    }

    fn stroke_width(&self, width: f32) -> u32 {
        (width * self.scale).round().max(1.0) as u32
    }

    fn replay<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, command: &DrawCommand) -> ReportResult<()> {
        match command {
            DrawCommand::Rect { rect, corner_radius, fill, stroke } => {
                let outline = self.pixels(&rounded_rect_outline(rect, *corner_radius));
                if let Some(fill) = fill {
                    area.draw(&Polygon::new(outline.clone(), color(*fill).filled()))
                        .map_err(preview_error)?;
                }
                if let Some(stroke) = stroke {
                    let mut closed = outline;
                    if let Some(first) = closed.first().copied() {
                        closed.push(first);
                    }
                    area.draw(&PathElement::new(
                        closed,
                        color(stroke.color).stroke_width(self.stroke_width(stroke.width)),
                    ))
                    .map_err(preview_error)?;
                }
            }
            DrawCommand::Circle { center, radius, fill } => {
                area.draw(&Polygon::new(
                    self.pixels(&circle_outline(*center, *radius)),
                    color(*fill).filled(),
                ))
                .map_err(preview_error)?;
            }
            DrawCommand::Wedge { center, radius, start_deg, sweep_deg, fill } => {
                area.draw(&Polygon::new(
                    self.pixels(&wedge_outline(*center, *radius, *start_deg, *sweep_deg)),
                    color(*fill).filled(),
                ))
                .map_err(preview_error)?;
            }
            DrawCommand::Polygon { points, fill } => {
                area.draw(&Polygon::new(self.pixels(points), color(*fill).filled()))
                    .map_err(preview_error)?;
            }
            DrawCommand::Polyline { points, stroke } => {
                area.draw(&PathElement::new(
                    self.pixels(points),
                    color(stroke.color).stroke_width(self.stroke_width(stroke.width)),
                ))
                .map_err(preview_error)?;
            }
            DrawCommand::Text { origin, font, color: text_color, width, .. } => {
                // x-height band above the baseline
                let top_left = self.pixel(Point::new(origin.x, origin.y - font.size * 0.55));
                let bottom_right = self.pixel(Point::new(origin.x + width, origin.y - font.size * 0.1));
                area.draw(&Rectangle::new(
                    [top_left, bottom_right],
                    color(text_color.over_white(TEXT_BAR_ALPHA)).filled(),
                ))
                .map_err(preview_error)?;
            }
        }
        Ok(())
    }
}

/// Bytes of an RGB buffer for the given pixel size
fn buffer_len(width: u32, height: u32) -> ReportResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|pixels| *pixels <= MAX_PREVIEW_PIXELS)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(|| ReportError::Preview(format!("preview of {}x{} pixels is too large", width, height)))
}

/// Rasterize `page` at `scale` pixels per point and encode it as PNG
pub fn render_preview(page: &Page, scale: f32) -> ReportResult<Vec<u8>> {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale.min(MAX_PREVIEW_SCALE)
    } else {
        DEFAULT_PREVIEW_SCALE
    };
    let width = (page.width * scale).round().max(1.0) as u32;
    let height = (page.height * scale).round().max(1.0) as u32;
    let mut buffer = vec![0u8; buffer_len(width, height)?];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(preview_error)?;
        let raster = Raster { scale };
        for command in &page.commands {
            raster.replay(&root, command)?;
        }
        root.present().map_err(preview_error)?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ReportError::Preview("buffer does not match preview size".to_string()))?;
    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(preview_error)?;

    tracing::debug!(width, height, bytes = png_bytes.len(), "preview rasterized");
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FontSpec, Rect};

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn page() -> Page {
        Page {
            width: 100.0,
            height: 80.0,
            commands: vec![
                DrawCommand::Rect {
                    rect: Rect::new(10.0, 10.0, 30.0, 20.0),
                    corner_radius: 4.0,
                    fill: Some(Rgb(0, 176, 80)),
                    stroke: None,
                },
                DrawCommand::Circle {
                    center: Point::new(70.0, 40.0),
                    radius: 12.0,
                    fill: Rgb(255, 0, 0),
                },
                DrawCommand::Text {
                    text: "72%".into(),
                    origin: Point::new(10.0, 60.0),
                    font: FontSpec::regular(10.0),
                    color: Rgb::BLACK,
                    width: 18.0,
                },
            ],
        }
    }

    #[test]
    fn test_preview_is_png_at_scale() {
        let png = render_preview(&page(), 2.0).unwrap();
        assert!(png.starts_with(PNG_SIGNATURE));
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 160));
    }

    #[test]
    fn test_preview_pixels_follow_commands() {
        let png = render_preview(&page(), 1.0).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(25, 20).0, [0, 176, 80]);
        assert_eq!(decoded.get_pixel(70, 40).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(95, 75).0, [255, 255, 255]);
    }

    #[test]
    fn test_preview_is_repeatable() {
        assert_eq!(render_preview(&page(), 1.0).unwrap(), render_preview(&page(), 1.0).unwrap());
    }

    #[test]
    fn test_oversized_page_is_an_error() {
        assert_eq!(buffer_len(200, 160).unwrap(), 96_000);
        assert!(matches!(buffer_len(u32::MAX, u32::MAX), Err(ReportError::Preview(_))));
    }

    #[test]
    fn test_huge_configured_page_is_rejected() {
        let page = Page {
            width: 1.0e9,
            height: 1.0e9,
            commands: Vec::new(),
        };
        assert!(matches!(render_preview(&page, 1.0), Err(ReportError::Preview(_))));
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        let png = render_preview(&page(), f32::NAN).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 100);
    }
}
