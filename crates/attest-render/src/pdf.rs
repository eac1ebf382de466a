//! Single-page PDF emission wrapping the rendered canvas.

use image::RgbaImage;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use crate::{Error, Result};

/// Raster resolution the page size is derived from.
const DPI: f32 = 150.0;

fn page_mm(px: u32) -> Mm {
  Mm((px as f32 * 25.4 / DPI) as _)
}

/// Encode `canvas` as a one-page PDF containing only the image, sized so
/// the image fills the page exactly.
pub fn pdf_bytes(title: &str, canvas: &RgbaImage) -> Result<Vec<u8>> {
  let (width, height) = canvas.dimensions();
  let (doc, page, layer) =
    PdfDocument::new(title, page_mm(width), page_mm(height), "certificate");
  let layer = doc.get_page(page).get_layer(layer);

  // Flatten to RGB; the canvas is fully opaque by construction.
  let rgb = image::DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
  let pdf_image = Image::from_dynamic_image(&image::DynamicImage::ImageRgb8(rgb));
  pdf_image.add_to_layer(layer, ImageTransform {
    dpi: Some(DPI as _),
    ..Default::default()
  });

  doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}
