//! QR generation — one scannable code per certificate id.

use image::{RgbaImage, imageops};
use qrcode::QrCode;

use crate::Result;

/// Render `data` as a square RGBA image of exactly `size` pixels.
///
/// The QR renderer only produces whole-module sizes, so the matrix is
/// drawn at the largest module size that fits and then scaled up to
/// `size` with nearest-neighbour filtering, which keeps the modules
/// crisp.
pub fn qr_image(data: &str, size: u32) -> Result<RgbaImage> {
  let code = QrCode::new(data.as_bytes())?;
  // qrcode renders into image 0.25's Luma; reinterpret the raw gray bytes as
  // image 0.24's GrayImage (identical layout) so the rest of the pipeline stays
  // on one image version.
  let rendered = code
    .render::<image_qr::Luma<u8>>()
    .quiet_zone(true)
    .max_dimensions(size, size)
    .build();
  let (w, h) = (rendered.width(), rendered.height());
  let luma = image::GrayImage::from_raw(w, h, rendered.into_raw())
    .expect("qr render buffer length matches its dimensions");
  let luma = imageops::resize(&luma, size, size, imageops::FilterType::Nearest);
  Ok(image::DynamicImage::ImageLuma8(luma).to_rgba8())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn qr_is_square_at_the_requested_size() {
    let img = qr_image("1PYTH001", 150).unwrap();
    assert_eq!(img.dimensions(), (150, 150));
  }

  #[test]
  fn qr_contains_dark_and_light_modules() {
    let img = qr_image("1PYTH001", 150).unwrap();
    let mut dark = false;
    let mut light = false;
    for pixel in img.pixels() {
      match pixel.0[0] {
        0 => dark = true,
        255 => light = true,
        _ => {}
      }
    }
    assert!(dark && light);
  }

  #[test]
  fn different_ids_encode_differently() {
    let a = qr_image("1PYTH001", 150).unwrap();
    let b = qr_image("1PYTH002", 150).unwrap();
    assert_ne!(a.as_raw(), b.as_raw());
  }
}
