//! Glyph rasterization onto the certificate canvas.

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// Each glyph's coverage is alpha-blended against the existing pixels, so
/// anti-aliased edges composite cleanly over the template artwork.
pub fn draw_text(
  img:   &mut RgbaImage,
  font:  &Font<'_>,
  px:    f32,
  x:     i32,
  y:     i32,
  color: Rgba<u8>,
  text:  &str,
) {
  let scale = Scale::uniform(px);
  let v_metrics = font.v_metrics(scale);
  let baseline = point(x as f32, y as f32 + v_metrics.ascent);

  for glyph in font.layout(text, scale, baseline) {
    let Some(bb) = glyph.pixel_bounding_box() else { continue };

    glyph.draw(|gx, gy, coverage| {
      let px_x = gx as i32 + bb.min.x;
      let px_y = gy as i32 + bb.min.y;
      if px_x < 0 || px_y < 0 {
        return;
      }
      let (px_x, px_y) = (px_x as u32, px_y as u32);
      if px_x >= img.width() || px_y >= img.height() {
        return;
      }

      let alpha = coverage.clamp(0.0, 1.0);
      let inv = 1.0 - alpha;
      let dst = img.get_pixel_mut(px_x, px_y);
      for channel in 0..3 {
        dst.0[channel] =
          (color.0[channel] as f32 * alpha + dst.0[channel] as f32 * inv) as u8;
      }
      dst.0[3] = 255;
    });
  }
}
