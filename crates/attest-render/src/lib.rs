//! Certificate rasterization for Attest.
//!
//! Composites the recipient fields and a QR code onto a template (or
//! blank) canvas and emits the result as a single-page PDF. Pure
//! synchronous; no HTTP or storage dependencies.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod qr;
pub mod text;

pub use error::{Error, Result};
pub use layout::Layout;

use std::path::Path;

use attest_core::render::{CertificateFields, Renderer};
use image::{Rgba, RgbaImage};
use rusttype::Font;

/// Renders certificates from a TrueType font and an optional template
/// image.
///
/// When no template is configured the canvas is plain white at the layout
/// dimensions, which keeps the pipeline usable before the artwork exists.
pub struct ImageRenderer {
  template: Option<RgbaImage>,
  font:     Font<'static>,
  layout:   Layout,
}

impl ImageRenderer {
  /// Load the font (and template, when given) from disk.
  pub fn open(
    font_path: &Path,
    template_path: Option<&Path>,
    layout: Layout,
  ) -> Result<Self> {
    let font_bytes = std::fs::read(font_path)?;
    let font = Font::try_from_vec(font_bytes)
      .ok_or_else(|| Error::Font(font_path.to_path_buf()))?;

    let template = match template_path {
      Some(path) => Some(image::open(path)?.to_rgba8()),
      None => None,
    };

    Ok(Self { template, font, layout })
  }

  pub fn layout(&self) -> &Layout { &self.layout }

  fn canvas(&self) -> RgbaImage {
    match &self.template {
      Some(template) => template.clone(),
      None => RgbaImage::from_pixel(
        self.layout.canvas_width,
        self.layout.canvas_height,
        Rgba([255, 255, 255, 255]),
      ),
    }
  }

  /// Composite one certificate and return the raw canvas.
  pub fn render_canvas(&self, fields: &CertificateFields) -> Result<RgbaImage> {
    let mut canvas = self.canvas();
    let layout = &self.layout;
    let black = Rgba([0, 0, 0, 255]);

    let date_text = fields.issued_on.format("%B %d, %Y").to_string();

    text::draw_text(
      &mut canvas,
      &self.font,
      layout.font_size,
      layout.name_pos.0,
      layout.name_pos.1,
      black,
      &fields.name,
    );
    text::draw_text(
      &mut canvas,
      &self.font,
      layout.font_size,
      layout.course_pos.0,
      layout.course_pos.1,
      black,
      &fields.course,
    );
    text::draw_text(
      &mut canvas,
      &self.font,
      layout.font_size,
      layout.date_pos.0,
      layout.date_pos.1,
      black,
      &date_text,
    );

    let qr = qr::qr_image(fields.certificate_id.as_str(), layout.qr_size)?;
    image::imageops::overlay(
      &mut canvas,
      &qr,
      layout.qr_pos.0 as i64,
      layout.qr_pos.1 as i64,
    );

    Ok(canvas)
  }
}

impl Renderer for ImageRenderer {
  type Error = Error;

  fn render_pdf(&self, fields: &CertificateFields) -> Result<Vec<u8>> {
    let canvas = self.render_canvas(fields)?;
    pdf::pdf_bytes(fields.certificate_id.as_str(), &canvas)
  }
}
