// Uniform luminance-coefficient quantization.
//
// a_q is unsigned 6-bit (the clamp range [0,1] for a times 63 always
// lands in [0,63]); b_q/c_q/d_q are signed 6-bit (the clamp range
// [-0.3,0.3] times 50 always lands in [-15,15], well inside the 6-bit
// signed range).

use crate::pixel::{BlockRecord, QuantizedBlock};
use crate::util::round_half_away_from_zero;

const A_SCALE: f32 = 63.0;
const BCD_SCALE: f32 = 50.0;

// Quantize a block's luma coefficients (not its chroma averages - that's
// chroma.rs's job). Every fit-test implied here is guaranteed to pass
// because the input ranges are the clamp ranges enforced by dct.rs.
pub fn quantize_luma(block: &BlockRecord) -> (u8, i8, i8, i8) {
  let a_q = round_half_away_from_zero(block.a * A_SCALE) as u8;
  let b_q = round_half_away_from_zero(block.b * BCD_SCALE) as i8;
  let c_q = round_half_away_from_zero(block.c * BCD_SCALE) as i8;
  let d_q = round_half_away_from_zero(block.d * BCD_SCALE) as i8;
  (a_q, b_q, c_q, d_q)
}

// Dequantize a block's luma coefficients back to floats.
pub fn dequantize_luma(a_q: u8, b_q: i8, c_q: i8, d_q: i8) -> (f32, f32, f32, f32) {
  (
    a_q as f32 / A_SCALE,
    b_q as f32 / BCD_SCALE,
    c_q as f32 / BCD_SCALE,
    d_q as f32 / BCD_SCALE,
  )
}

// Quantize a full block (luma coefficients + chroma averages) into its
// bit-width-checked mirror.
pub fn quantize_block(block: &BlockRecord) -> QuantizedBlock {
  let (a_q, b_q, c_q, d_q) = quantize_luma(block);
  QuantizedBlock {
    a_q,
    b_q,
    c_q,
    d_q,
    pb_idx: crate::chroma::index_of_chroma(block.avg_pb),
    pr_idx: crate::chroma::index_of_chroma(block.avg_pr),
  }
}

// Dequantize a full block back to float form.
pub fn dequantize_block(q: &QuantizedBlock) -> BlockRecord {
  let (a, b, c, d) = dequantize_luma(q.a_q, q.b_q, q.c_q, q.d_q);
  BlockRecord {
    avg_pb: crate::chroma::chroma_of_index(q.pb_idx),
    avg_pr: crate::chroma::chroma_of_index(q.pr_idx),
    a,
    b,
    c,
    d,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bitpack::{fits_signed, fits_unsigned};

  #[test]
  fn zero_block_quantizes_to_zero() {
    let block = BlockRecord::default();
    let (a_q, b_q, c_q, d_q) = quantize_luma(&block);
    assert_eq!((a_q, b_q, c_q, d_q), (0, 0, 0, 0));
  }

  #[test]
  fn max_luma_quantizes_to_63() {
    let block = BlockRecord { a: 1.0, ..Default::default() };
    let (a_q, _, _, _) = quantize_luma(&block);
    assert_eq!(a_q, 63);
  }

  #[test]
  fn quantized_fields_always_fit_their_bit_widths() {
    let samples = [-0.3f32, -0.1, 0.0, 0.1, 0.3];
    for &a in &[0.0f32, 0.5, 1.0] {
      for &b in &samples {
        for &c in &samples {
          for &d in &samples {
            let block = BlockRecord { a, b, c, d, avg_pb: 0.0, avg_pr: 0.0 };
            let (a_q, b_q, c_q, d_q) = quantize_luma(&block);
            assert!(fits_unsigned(a_q as u64, 6));
            assert!(fits_signed(b_q as i64, 6));
            assert!(fits_signed(c_q as i64, 6));
            assert!(fits_signed(d_q as i64, 6));
          }
        }
      }
    }
  }

  #[test]
  fn dequantize_undoes_quantize_for_luma() {
    let block = BlockRecord { a: 0.42, b: 0.12, c: -0.2, d: 0.05, avg_pb: 0.0, avg_pr: 0.0 };
    let q = quantize_block(&block);
    let back = dequantize_block(&q);
    assert!((back.a - block.a).abs() < 1.0 / 63.0);
    assert!((back.b - block.b).abs() < 1.0 / 50.0);
  }
}
