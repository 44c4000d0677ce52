// Codeword assembly / disassembly.
//
// Pack order MSB->LSB: a_q[31:26] b_q[25:20] c_q[19:14] d_q[13:8]
// pb_idx[7:4] pr_idx[3:0], built on bitpack.rs.

use crate::bitpack::{get_signed, get_unsigned, set_signed, set_unsigned};
use crate::pixel::{Codeword, QuantizedBlock};

const A_WIDTH: u32 = 6;
const BCD_WIDTH: u32 = 6;
const IDX_WIDTH: u32 = 4;

const A_LSB: u32 = 26;
const B_LSB: u32 = 20;
const C_LSB: u32 = 14;
const D_LSB: u32 = 8;
const PB_LSB: u32 = 4;
const PR_LSB: u32 = 0;

// Assemble one 32-bit codeword from a quantized block.
pub fn pack(q: &QuantizedBlock) -> Codeword {
  let mut word = 0u64;
  word = set_unsigned(word, A_WIDTH, A_LSB, q.a_q as u64);
  word = set_signed(word, BCD_WIDTH, B_LSB, q.b_q as i64);
  word = set_signed(word, BCD_WIDTH, C_LSB, q.c_q as i64);
  word = set_signed(word, BCD_WIDTH, D_LSB, q.d_q as i64);
  word = set_unsigned(word, IDX_WIDTH, PB_LSB, q.pb_idx as u64);
  word = set_unsigned(word, IDX_WIDTH, PR_LSB, q.pr_idx as u64);
  Codeword(word as u32)
}

// Disassemble one 32-bit codeword into its quantized fields.
pub fn unpack(codeword: Codeword) -> QuantizedBlock {
  let word = codeword.0 as u64;
  QuantizedBlock {
    a_q: get_unsigned(word, A_WIDTH, A_LSB) as u8,
    b_q: get_signed(word, BCD_WIDTH, B_LSB) as i8,
    c_q: get_signed(word, BCD_WIDTH, C_LSB) as i8,
    d_q: get_signed(word, BCD_WIDTH, D_LSB) as i8,
    pb_idx: get_unsigned(word, IDX_WIDTH, PB_LSB) as u8,
    pr_idx: get_unsigned(word, IDX_WIDTH, PR_LSB) as u8,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pack_unpack_round_trips() {
    for a_q in [0u8, 31, 63] {
      for b_q in [-32i8, -1, 0, 1, 31] {
        for pb_idx in [0u8, 7, 15] {
          let q = QuantizedBlock {
            a_q,
            b_q,
            c_q: b_q,
            d_q: b_q,
            pb_idx,
            pr_idx: 15 - pb_idx,
          };
          let word = pack(&q);
          assert_eq!(unpack(word), q);
        }
      }
    }
  }

  #[test]
  fn all_zero_block_packs_to_zero_word() {
    let q = QuantizedBlock::default();
    assert_eq!(pack(&q).0, 0);
  }

  #[test]
  fn white_block_packs_a_q_to_63_in_top_bits() {
    let q = QuantizedBlock { a_q: 63, ..Default::default() };
    let word = pack(&q);
    assert_eq!(word.0, 63u32 << 26);
  }
}
