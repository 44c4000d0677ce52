// Compress/decompress pipeline orchestration.
//
// Each stage takes ownership of an input Array2D and returns a freshly
// allocated Array2D of the output element type - no mutate-then-rebind,
// no running-sum accumulator carried across a block-major traversal.

use crate::array2d::Array2D;
use crate::codeword;
use crate::colorspace::{rgb_to_yp, yp_to_rgb};
use crate::container;
use crate::dct::{self, Block4};
use crate::error::{Comp40Error, Result};
use crate::pixel::{BlockRecord, Codeword, QuantizedBlock, Rgb, Yp};
use crate::ppm::RgbImage;
use crate::quant;

const STAGE: &str = "pipeline";

// Drop the last column if width is odd, the last row if height is odd.
fn trim(image: &RgbImage) -> Array2D<Rgb> {
  let width = image.pixels.cols() - (image.pixels.cols() % 2);
  let height = image.pixels.rows() - (image.pixels.rows() % 2);
  log::debug!("trim: {}x{} -> {}x{}", image.pixels.cols(), image.pixels.rows(), width, height);

  Array2D::new_with(height, width, |i, j| image.pixels[i][j])
}

// RGB -> Yp, per pixel.
fn to_yp_plane(rgb: &Array2D<Rgb>, denom: u16) -> Array2D<Yp> {
  Array2D::new_with(rgb.rows(), rgb.cols(), |i, j| rgb_to_yp(rgb[i][j], denom))
}

// 2x2 chroma averaging + forward DCT. Reads all four cells of each block
// in one pass, rather than accumulating running sums across a
// block-major per-pixel traversal.
fn reduce_with_dct(yp: &Array2D<Yp>) -> Array2D<BlockRecord> {
  let out_rows = yp.rows() / 2;
  let out_cols = yp.cols() / 2;
  let mut blocks = Array2D::new_with(out_rows, out_cols, |_, _| BlockRecord::default());

  for coords in yp.iter_blocks_2x2() {
    let [(r0, c0), (r1, c1), (r2, c2), (r3, c3)] = coords;
    let p1 = yp[r0][c0];
    let p2 = yp[r1][c1];
    let p3 = yp[r2][c2];
    let p4 = yp[r3][c3];

    let avg_pb = (p1.pb + p2.pb + p3.pb + p4.pb) / 4.0;
    let avg_pr = (p1.pr + p2.pr + p3.pr + p4.pr) / 4.0;
    let (a, b, c, d) =
      dct::forward(Block4 { y1: p1.y, y2: p2.y, y3: p3.y, y4: p4.y });

    blocks[r0 / 2][c0 / 2] = BlockRecord {
      avg_pb: crate::util::clamp(avg_pb, -0.5, 0.5),
      avg_pr: crate::util::clamp(avg_pr, -0.5, 0.5),
      a,
      b,
      c,
      d,
    };
  }

  blocks
}

// Quantize every block's float record into its bit-width-checked mirror.
fn quantize_blocks(blocks: &Array2D<BlockRecord>) -> Array2D<QuantizedBlock> {
  Array2D::new_with(blocks.rows(), blocks.cols(), |i, j| quant::quantize_block(&blocks[i][j]))
}

// Pack every quantized block into a 32-bit codeword.
fn pack_codewords(blocks: &Array2D<QuantizedBlock>) -> Array2D<Codeword> {
  Array2D::new_with(blocks.rows(), blocks.cols(), |i, j| codeword::pack(&blocks[i][j]))
}

// Compress a decoded RGB pixmap into a "COMP40 Compressed image format 2"
// byte stream.
pub fn compress(image: &RgbImage) -> Vec<u8> {
  let trimmed = trim(image);
  log::debug!(
    "compress: denom={} dims={}x{}",
    image.denom,
    trimmed.cols(),
    trimmed.rows()
  );

  let yp = to_yp_plane(&trimmed, image.denom);
  let blocks = reduce_with_dct(&yp);
  let quantized = quantize_blocks(&blocks);
  let codewords = pack_codewords(&quantized);

  let width = codewords.cols();
  let height = codewords.rows();

  let mut out = Vec::new();
  container::write_header(&mut out, width, height).expect("writing to a Vec<u8> cannot fail");
  let flat: Vec<Codeword> = codewords.iter_row_major().map(|(_, _, &cw)| cw).collect();
  container::write_codewords(&mut out, &flat).expect("writing to a Vec<u8> cannot fail");

  log::debug!("compress: emitted {} codewords ({} bytes payload)", flat.len(), flat.len() * 4);
  out
}

// Unpack every codeword into its quantized block fields.
fn unpack_codewords(codewords: &Array2D<Codeword>) -> Array2D<QuantizedBlock> {
  Array2D::new_with(codewords.rows(), codewords.cols(), |i, j| codeword::unpack(codewords[i][j]))
}

// Dequantize every block back to float form.
fn dequantize_blocks(blocks: &Array2D<QuantizedBlock>) -> Array2D<BlockRecord> {
  Array2D::new_with(blocks.rows(), blocks.cols(), |i, j| quant::dequantize_block(&blocks[i][j]))
}

// Expand each block record back into a 2x2 of Yp pixels via the inverse
// DCT, each sharing the block's avg_pb/avg_pr.
fn expand_with_inverse_dct(blocks: &Array2D<BlockRecord>) -> Array2D<Yp> {
  let mut yp = Array2D::new_with(blocks.rows() * 2, blocks.cols() * 2, |_, _| Yp::default());

  for i in 0..blocks.rows() {
    for j in 0..blocks.cols() {
      let block = blocks[i][j];
      let Block4 { y1, y2, y3, y4 } = dct::inverse(block.a, block.b, block.c, block.d);

      let (r, c) = (i * 2, j * 2);
      yp[r][c] = Yp { y: y1, pb: block.avg_pb, pr: block.avg_pr };
      yp[r][c + 1] = Yp { y: y2, pb: block.avg_pb, pr: block.avg_pr };
      yp[r + 1][c] = Yp { y: y3, pb: block.avg_pb, pr: block.avg_pr };
      yp[r + 1][c + 1] = Yp { y: y4, pb: block.avg_pb, pr: block.avg_pr };
    }
  }

  yp
}

// Yp -> RGB, per pixel.
fn to_rgb_plane(yp: &Array2D<Yp>, denom: u16) -> Array2D<Rgb> {
  Array2D::new_with(yp.rows(), yp.cols(), |i, j| yp_to_rgb(yp[i][j], denom))
}

// Decompress a "COMP40 Compressed image format 2" byte stream into an
// RGB pixmap at denominator 255.
pub fn decompress(bytes: &[u8]) -> Result<RgbImage> {
  let mut cursor = std::io::Cursor::new(bytes);
  let header = container::read_header(&mut cursor)?;

  let count = header.width.checked_mul(header.height).ok_or_else(|| {
    Comp40Error::precondition(STAGE, format!("dimensions {}x{} overflow", header.width, header.height))
  })?;
  let flat = container::read_codewords(&mut cursor, count)?;

  let codewords = Array2D::new_with(header.height, header.width, |i, j| flat[i * header.width + j]);
  log::debug!("decompress: header dims {}x{}, {} codewords read", header.width, header.height, flat.len());

  let quantized = unpack_codewords(&codewords);
  let blocks = dequantize_blocks(&quantized);
  let yp = expand_with_inverse_dct(&blocks);
  let pixels = to_rgb_plane(&yp, 255);

  Ok(RgbImage { denom: 255, pixels })
}
