// RGB <-> Yp (component video) per-pixel colorspace transforms.

use crate::pixel::{Rgb, Yp};
use crate::util::{clamp, round_half_away_from_zero};

// Convert one RGB pixel (channels in [0, denom]) to Yp.
pub fn rgb_to_yp(rgb: Rgb, denom: u16) -> Yp {
  let denom = denom as f32;
  let r = rgb.red as f32 / denom;
  let g = rgb.green as f32 / denom;
  let b = rgb.blue as f32 / denom;

  let y = 0.299 * r + 0.587 * g + 0.114 * b;
  let pb = -0.168736 * r - 0.331264 * g + 0.5 * b;
  let pr = 0.5 * r - 0.418688 * g - 0.081312 * b;

  Yp {
    y: clamp(y, 0.0, 1.0),
    pb: clamp(pb, -0.5, 0.5),
    pr: clamp(pr, -0.5, 0.5),
  }
}

// Convert one Yp pixel back to RGB, scaled by `denom`.
pub fn yp_to_rgb(yp: Yp, denom: u16) -> Rgb {
  let r = yp.y + 1.402 * yp.pr;
  let g = yp.y - 0.344136 * yp.pb - 0.714136 * yp.pr;
  let b = yp.y + 1.772 * yp.pb;

  let r = clamp(r, 0.0, 1.0) * denom as f32;
  let g = clamp(g, 0.0, 1.0) * denom as f32;
  let b = clamp(b, 0.0, 1.0) * denom as f32;

  Rgb {
    red: round_half_away_from_zero(r) as u16,
    green: round_half_away_from_zero(g) as u16,
    blue: round_half_away_from_zero(b) as u16,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip_within_one_unit() {
    let denom = 255u16;
    for red in (0..=255u16).step_by(17) {
      for green in (0..=255u16).step_by(23) {
        for blue in (0..=255u16).step_by(29) {
          let rgb = Rgb { red, green, blue };
          let yp = rgb_to_yp(rgb, denom);
          let back = yp_to_rgb(yp, denom);

          assert!((back.red as i32 - red as i32).abs() <= 1);
          assert!((back.green as i32 - green as i32).abs() <= 1);
          assert!((back.blue as i32 - blue as i32).abs() <= 1);
        }
      }
    }
  }

  #[test]
  fn black_and_white_map_to_zero_chroma() {
    let denom = 255u16;
    let black = rgb_to_yp(Rgb { red: 0, green: 0, blue: 0 }, denom);
    assert_eq!(black.y, 0.0);
    assert_eq!(black.pb, 0.0);
    assert_eq!(black.pr, 0.0);

    let white = rgb_to_yp(Rgb { red: 255, green: 255, blue: 255 }, denom);
    assert!((white.y - 1.0).abs() < 1e-5);
    assert!(white.pb.abs() < 1e-5);
    assert!(white.pr.abs() < 1e-5);
  }

  #[test]
  fn outputs_stay_within_declared_ranges() {
    let denom = 255u16;
    for red in [0u16, 255] {
      for green in [0u16, 255] {
        for blue in [0u16, 255] {
          let yp = rgb_to_yp(Rgb { red, green, blue }, denom);
          assert!((0.0..=1.0).contains(&yp.y));
          assert!((-0.5..=0.5).contains(&yp.pb));
          assert!((-0.5..=0.5).contains(&yp.pr));
        }
      }
    }
  }
}
