// Per-stage element types that flow through the pipeline's Array2D
// buffers, plus the per-block records.

use bytemuck::Zeroable;

// An RGB pixel, channel values in [0, denominator]. Widened to u16 since
// the PPM reader accepts denominators up to 65535.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Zeroable)]
pub struct Rgb {
  pub red: u16,
  pub green: u16,
  pub blue: u16,
}

// A Yp (component video) pixel: luma in [0, 1], chroma in [-0.5, 0.5].
#[derive(Clone, Copy, Debug, PartialEq, Default, Zeroable)]
pub struct Yp {
  pub y: f32,
  pub pb: f32,
  pub pr: f32,
}

// The per-2x2-block float record produced by chroma averaging + DCT,
// before luma/chroma quantization.
#[derive(Clone, Copy, Debug, PartialEq, Default, Zeroable)]
pub struct BlockRecord {
  pub avg_pb: f32,
  pub avg_pr: f32,
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub d: f32,
}

// The quantized mirror of a BlockRecord, with every field already
// checked to fit its declared bit width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Zeroable)]
pub struct QuantizedBlock {
  pub a_q: u8,
  pub b_q: i8,
  pub c_q: i8,
  pub d_q: i8,
  pub pb_idx: u8,
  pub pr_idx: u8,
}

// One packed 32-bit codeword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Zeroable)]
pub struct Codeword(pub u32);
