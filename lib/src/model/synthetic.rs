use rand::Rng;

use super::{Dataset, FeatureVector, Label, IMAGE_SIDE, MAX_INTENSITY, N_CLASSES};

/// 8x8 bitmaps for 0-9, one byte per row, most significant bit leftmost.
const GLYPHS: [[u8; IMAGE_SIDE]; N_CLASSES] = [
  [0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00],
  [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
  [0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00],
  [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
  [0x0C, 0x1C, 0x2C, 0x4C, 0x7E, 0x0C, 0x0C, 0x00],
  [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
  [0x3C, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x3C, 0x00],
  [0x7E, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00],
  [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
  [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x0C, 0x38, 0x00],
];

/// Clean rendering of `digit` at full intensity.
pub fn glyph(digit: Label) -> FeatureVector {
  let rows = &GLYPHS[usize::from(digit) % N_CLASSES];
  let mut image = [0.0; IMAGE_SIDE * IMAGE_SIDE];
  for (r, bits) in rows.iter().enumerate() {
    for c in 0..IMAGE_SIDE {
      if bits & (0x80 >> c) != 0 {
        image[r * IMAGE_SIDE + c] = MAX_INTENSITY;
      }
    }
  }
  image
}

/// Built-in stand-in for the reference digits data: `per_class` noisy copies of
/// each glyph, interleaved `0, 1, ..., 9, 0, 1, ...` so that any positional cut
/// leaves every digit on both sides once there are enough rounds.
///
/// `noise` is the per-pixel jitter amplitude as a fraction of full intensity;
/// pixels are clamped back to `[0, MAX_INTENSITY]`.
pub fn synthetic_digits<R: Rng + ?Sized>(per_class: usize, noise: f32, rng: &mut R) -> Dataset {
  let amplitude = noise.abs() * MAX_INTENSITY;
  let mut x = Vec::with_capacity(per_class * N_CLASSES);
  let mut y = Vec::with_capacity(per_class * N_CLASSES);
  for _ in 0..per_class {
    for digit in 0..N_CLASSES as Label {
      let mut image = glyph(digit);
      if amplitude > 0.0 {
        for pixel in image.iter_mut() {
          *pixel = (*pixel + rng.gen_range(-amplitude..=amplitude)).clamp(0.0, MAX_INTENSITY);
        }
      }
      x.push(image);
      y.push(digit);
    }
  }
  (x, y)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn test_glyph_one() {
    let one = glyph(1);
    // top row 0x18: columns 3 and 4 lit
    let top: Vec<f32> = one[..IMAGE_SIDE].to_vec();
    assert_eq!(top, vec![0.0, 0.0, 0.0, 16.0, 16.0, 0.0, 0.0, 0.0]);
    assert!(one[IMAGE_SIDE * 7..].iter().all(|&p| p == 0.0));
  }

  #[test]
  fn test_glyphs_are_distinct() {
    for a in 0..N_CLASSES as Label {
      for b in (a + 1)..N_CLASSES as Label {
        assert_ne!(glyph(a), glyph(b), "{a} and {b} render the same");
      }
    }
  }

  #[test]
  fn test_interleaved_and_clean_without_noise() {
    let mut rng = StdRng::seed_from_u64(1);
    let (x, y) = synthetic_digits(2, 0.0, &mut rng);
    assert_eq!(x.len(), 20);
    assert_eq!(y[..10], [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(y[10..], y[..10]);
    assert_eq!(x[13], glyph(3));
  }

  #[test]
  fn test_noise_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let (x, _) = synthetic_digits(5, 0.5, &mut rng);
    assert!(x.iter().flatten().all(|&p| (0.0..=MAX_INTENSITY).contains(&p)));
    assert_ne!(x[0], glyph(0));
  }

  #[test]
  fn test_same_seed_same_data() {
    let a = synthetic_digits(3, 0.3, &mut StdRng::seed_from_u64(42));
    let b = synthetic_digits(3, 0.3, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }
}
