//! Field placement on the certificate canvas.

/// Pixel positions of the drawable fields.
///
/// The defaults match the reference template this service was built
/// against; a deployment with a different template overrides the
/// positions it needs to move. Text positions are top-left anchored.
#[derive(Debug, Clone)]
pub struct Layout {
  /// Canvas size used when no template image is configured.
  pub canvas_width:  u32,
  pub canvas_height: u32,

  pub name_pos:   (i32, i32),
  pub course_pos: (i32, i32),
  pub date_pos:   (i32, i32),

  /// Top-left corner of the QR code.
  pub qr_pos:  (u32, u32),
  /// The QR code is square at this many pixels.
  pub qr_size: u32,

  pub font_size: f32,
}

impl Default for Layout {
  fn default() -> Self {
    Self {
      canvas_width:  1600,
      canvas_height: 1131,
      name_pos:      (450, 400),
      course_pos:    (450, 500),
      date_pos:      (450, 600),
      qr_pos:        (1000, 600),
      qr_size:       150,
      font_size:     50.0,
    }
  }
}
