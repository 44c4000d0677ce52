// "COMP40 Compressed image format 2" container I/O.
//
// Header: the magic line, then "<width> <height>\n" in decimal - the
// compressed-grid dimensions (half the trimmed image size). Payload: one
// big-endian 4-byte codeword per reduced-Pixmap cell, row-major.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Comp40Error, Result};
use crate::pixel::Codeword;

pub const MAGIC: &str = "COMP40 Compressed image format 2";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
  pub width: usize,
  pub height: usize,
}

// Write the container header: magic, newline, "width height", newline.
pub fn write_header<W: Write>(w: &mut W, width: usize, height: usize) -> std::io::Result<()> {
  writeln!(w, "{}", MAGIC)?;
  writeln!(w, "{} {}", width, height)?;
  Ok(())
}

// Parse the container header from a byte stream. Fails with
// Comp40Error::MalformedInput on magic mismatch or a truncated/malformed
// dimension line - this is input from a (possibly hostile) file, not a
// programmer error, so it's reported rather than asserted.
pub fn read_header<R: Read>(r: &mut R) -> Result<ContainerHeader> {
  const STAGE: &str = "container header";

  let mut magic_line = Vec::with_capacity(MAGIC.len() + 1);
  read_line(r, &mut magic_line)?;
  if magic_line != MAGIC.as_bytes() {
    return Err(Comp40Error::malformed(
      STAGE,
      format!("expected magic {:?}, got {:?}", MAGIC, String::from_utf8_lossy(&magic_line)),
    ));
  }

  let mut dims_line = Vec::new();
  read_line(r, &mut dims_line)?;
  let dims_str = String::from_utf8_lossy(&dims_line);
  let mut parts = dims_str.split_whitespace();
  let width = parts
    .next()
    .and_then(|s| s.parse::<usize>().ok())
    .ok_or_else(|| Comp40Error::malformed(STAGE, "missing or invalid width"))?;
  let height = parts
    .next()
    .and_then(|s| s.parse::<usize>().ok())
    .ok_or_else(|| Comp40Error::malformed(STAGE, "missing or invalid height"))?;

  Ok(ContainerHeader { width, height })
}

// Read one '\n'-terminated line (magic or dims), not including the
// newline. EOF before a newline is a malformed-input error.
fn read_line<R: Read>(r: &mut R, out: &mut Vec<u8>) -> Result<()> {
  loop {
    let byte = r.read_u8().map_err(|e| {
      if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Comp40Error::malformed("container header", "truncated before end of header")
      } else {
        Comp40Error::Io(e)
      }
    })?;
    if byte == b'\n' {
      return Ok(());
    }
    out.push(byte);
  }
}

// Write codewords in row-major order, each as four big-endian bytes.
pub fn write_codewords<W: Write>(w: &mut W, codewords: &[Codeword]) -> std::io::Result<()> {
  for cw in codewords {
    w.write_u32::<BigEndian>(cw.0)?;
  }
  Ok(())
}

// Read exactly `count` codewords, each four big-endian bytes.
pub fn read_codewords<R: Read>(r: &mut R, count: usize) -> Result<Vec<Codeword>> {
  let mut out = Vec::with_capacity(count);
  for _ in 0..count {
    let word = r.read_u32::<BigEndian>().map_err(|e| {
      if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Comp40Error::malformed("container payload", "truncated codeword payload")
      } else {
        Comp40Error::Io(e)
      }
    })?;
    out.push(Codeword(word));
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn header_round_trips() {
    let mut buf = Vec::new();
    write_header(&mut buf, 4, 2).unwrap();
    let mut cursor = std::io::Cursor::new(buf);
    let header = read_header(&mut cursor).unwrap();
    assert_eq!(header, ContainerHeader { width: 4, height: 2 });
  }

  #[test]
  fn codewords_round_trip_in_row_major_order() {
    let words = vec![Codeword(0x01020304), Codeword(0xFFEEDDCC)];
    let mut buf = Vec::new();
    write_codewords(&mut buf, &words).unwrap();
    assert_eq!(buf, vec![0x01, 0x02, 0x03, 0x04, 0xFF, 0xEE, 0xDD, 0xCC]);

    let mut cursor = std::io::Cursor::new(buf);
    let read_back = read_codewords(&mut cursor, 2).unwrap();
    assert_eq!(read_back, words);
  }

  #[test]
  fn truncated_header_is_malformed_input() {
    let bytes = b"COMP40 Compressed image format 2\n".to_vec();
    let mut cursor = std::io::Cursor::new(bytes);
    let result = read_header(&mut cursor);
    assert!(matches!(result, Err(Comp40Error::MalformedInput { .. })));
  }

  #[test]
  fn bad_magic_is_malformed_input() {
    let bytes = b"NOT THE RIGHT MAGIC\n1 1\n".to_vec();
    let mut cursor = std::io::Cursor::new(bytes);
    let result = read_header(&mut cursor);
    assert!(matches!(result, Err(Comp40Error::MalformedInput { .. })));
  }
}
