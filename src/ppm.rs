// Binary PPM (PNM type P6) reader/writer.

use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use crate::array2d::Array2D;
use crate::error::{Comp40Error, Result};
use crate::pixel::Rgb;

pub struct RgbImage {
  pub denom: u16,
  pub pixels: Array2D<Rgb>,
}

const STAGE: &str = "PPM";

fn read_byte<R: Read>(r: &mut R) -> Result<u8> {
  r.read_u8().map_err(|e| {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
      Comp40Error::malformed(STAGE, "truncated before end of header")
    } else {
      Comp40Error::Io(e)
    }
  })
}

// Skip whitespace and '#'-to-end-of-line comments, per the PNM header
// grammar, then return the first non-whitespace byte found.
fn skip_whitespace_and_comments<R: Read>(r: &mut R) -> Result<u8> {
  loop {
    let byte = read_byte(r)?;
    match byte {
      b' ' | b'\t' | b'\r' | b'\n' => continue,
      b'#' => {
        loop {
          if read_byte(r)? == b'\n' {
            break;
          }
        }
      }
      _ => return Ok(byte),
    }
  }
}

fn read_decimal<R: Read>(r: &mut R) -> Result<usize> {
  let mut first = skip_whitespace_and_comments(r)?;
  let mut value: usize = 0;
  let mut saw_digit = false;

  loop {
    match first {
      b'0'..=b'9' => {
        saw_digit = true;
        value = value * 10 + (first - b'0') as usize;
      }
      _ => break,
    }
    first = read_byte(r)?;
  }

  if !saw_digit {
    return Err(Comp40Error::malformed(STAGE, "expected a decimal number in header"));
  }
  Ok(value)
}

// Parse a binary PPM (P6) byte stream into an RgbImage. Accepts
// arbitrary width/height and denominator up to 65535.
pub fn read_ppm<R: Read>(r: &mut R) -> Result<RgbImage> {
  let mut magic = [0u8; 2];
  r.read_exact(&mut magic).map_err(|e| {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
      Comp40Error::malformed(STAGE, "truncated before magic number")
    } else {
      Comp40Error::Io(e)
    }
  })?;
  if &magic != b"P6" {
    return Err(Comp40Error::malformed(STAGE, format!("expected P6 magic, got {:?}", magic)));
  }

  let width = read_decimal(r)?;
  let height = read_decimal(r)?;
  let denom = read_decimal(r)?;

  if denom == 0 || denom > 65535 {
    return Err(Comp40Error::malformed(STAGE, format!("invalid denominator {}", denom)));
  }
  if width == 0 || height == 0 {
    return Err(Comp40Error::malformed(STAGE, format!("invalid dimensions {}x{}", width, height)));
  }

  // Exactly one whitespace byte follows maxval, already consumed by
  // read_decimal's trailing lookahead read - nothing further to skip.

  let bytes_per_sample = if denom < 256 { 1 } else { 2 };
  let mut row_buf = vec![0u8; width * 3 * bytes_per_sample];
  let mut pixels = Array2D::new_with(height, width, |_, _| Rgb::default());

  for row in 0..height {
    r.read_exact(&mut row_buf).map_err(|e| {
      if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Comp40Error::malformed(STAGE, "truncated pixel data")
      } else {
        Comp40Error::Io(e)
      }
    })?;
    for col in 0..width {
      let base = col * 3 * bytes_per_sample;
      let sample = |i: usize| -> u16 {
        if bytes_per_sample == 1 {
          row_buf[base + i] as u16
        } else {
          ((row_buf[base + 2 * i] as u16) << 8) | row_buf[base + 2 * i + 1] as u16
        }
      };
      pixels[row][col] = Rgb { red: sample(0), green: sample(1), blue: sample(2) };
    }
  }

  Ok(RgbImage { denom: denom as u16, pixels })
}

// Serialize an RgbImage as a standard binary PPM (P6).
pub fn write_ppm<W: Write>(w: &mut W, image: &RgbImage) -> std::io::Result<()> {
  let width = image.pixels.cols();
  let height = image.pixels.rows();
  write!(w, "P6\n{} {}\n{}\n", width, height, image.denom)?;

  let bytes_per_sample = if image.denom < 256 { 1 } else { 2 };
  for (_, _, pixel) in image.pixels.iter_row_major() {
    for sample in [pixel.red, pixel.green, pixel.blue] {
      if bytes_per_sample == 1 {
        w.write_all(&[sample as u8])?;
      } else {
        w.write_all(&sample.to_be_bytes())?;
      }
    }
  }
  Ok(())
}
