// Bit-field packing primitives.
//
// All fit-test / get / set operations work on 64-bit words, bits indexed
// from LSB = 0. Fit tests are pure integer shift/compare, never a
// floating-point power-of-two call. `fits_signed` uses the exact
// two's-complement range [-2^(w-1), 2^(w-1)-1].
//
// Precondition violations are programming errors: they abort via
// assert!, since there is no recoverable error for a malformed width or
// lsb position.

// True iff `n` fits in `width` unsigned bits.
pub fn fits_unsigned(n: u64, width: u32) -> bool {
  assert!(width >= 1 && width <= 64);
  if width == 64 {
    return true;
  }
  n <= (1u64 << width) - 1
}

// True iff `n` fits in `width` signed (two's-complement) bits.
pub fn fits_signed(n: i64, width: u32) -> bool {
  assert!(width >= 1 && width <= 64);
  if width == 64 {
    return true;
  }
  let hi = (1i64 << (width - 1)) - 1;
  let lo = -(1i64 << (width - 1));
  n >= lo && n <= hi
}

// Extract bits [lsb .. lsb+width) of `word` as an unsigned integer.
pub fn get_unsigned(word: u64, width: u32, lsb: u32) -> u64 {
  assert!(width >= 1 && width <= 64);
  assert!(lsb + width <= 64);
  if width == 64 {
    return word;
  }
  (word >> lsb) & ((1u64 << width) - 1)
}

// Extract bits [lsb .. lsb+width) of `word`, sign-extended to 64 bits.
pub fn get_signed(word: u64, width: u32, lsb: u32) -> i64 {
  assert!(width >= 1 && width <= 64);
  assert!(lsb + width <= 64);
  let shift = 64 - width;
  (((word >> lsb) << shift) as i64) >> shift
}

// Return a new word identical to `word` except bits [lsb .. lsb+width)
// replaced with `value`. Requires fits_unsigned(value, width).
pub fn set_unsigned(word: u64, width: u32, lsb: u32, value: u64) -> u64 {
  assert!(width >= 1 && width <= 64);
  assert!(lsb + width <= 64);
  assert!(fits_unsigned(value, width));

  let mask = if width == 64 { u64::MAX } else { ((1u64 << width) - 1) << lsb };
  (word & !mask) | (value << lsb)
}

// Return a new word identical to `word` except bits [lsb .. lsb+width)
// replaced with the two's-complement encoding of `value`. Requires
// fits_signed(value, width).
pub fn set_signed(word: u64, width: u32, lsb: u32, value: i64) -> u64 {
  assert!(width >= 1 && width <= 64);
  assert!(lsb + width <= 64);
  assert!(fits_signed(value, width));

  let field_mask = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
  set_unsigned(word, width, lsb, (value as u64) & field_mask)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unsigned_round_trip_preserves_other_bits() {
    for width in 1u32..=32 {
      for lsb in 0u32..=(64 - width).min(32) {
        let word = 0xA5A5_A5A5_5A5A_5A5Au64;
        let max = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
        for value in [0u64, max / 2, max] {
          assert!(fits_unsigned(value, width));
          let packed = set_unsigned(word, width, lsb, value);
          assert_eq!(get_unsigned(packed, width, lsb), value);

          let outside = !(((1u64 << width) - 1) << lsb);
          assert_eq!(packed & outside, word & outside);
        }
      }
    }
  }

  #[test]
  fn signed_round_trip_preserves_sign_and_other_bits() {
    for width in 2u32..=32 {
      for lsb in 0u32..=(64 - width).min(32) {
        let word = 0x5A5A_5A5A_A5A5_A5A5u64;
        let hi = (1i64 << (width - 1)) - 1;
        let lo = -(1i64 << (width - 1));
        for value in [lo, -1, 0, 1, hi] {
          assert!(fits_signed(value, width));
          let packed = set_signed(word, width, lsb, value);
          assert_eq!(get_signed(packed, width, lsb), value);

          let outside = !(((1u64 << width) - 1) << lsb);
          assert_eq!(packed & outside, word & outside);
        }
      }
    }
  }

  #[test]
  fn fits_unsigned_boundaries() {
    assert!(fits_unsigned(63, 6));
    assert!(!fits_unsigned(64, 6));
    assert!(fits_unsigned(0, 1));
    assert!(fits_unsigned(1, 1));
    assert!(!fits_unsigned(2, 1));
  }

  #[test]
  fn fits_signed_boundaries() {
    assert!(fits_signed(31, 6));
    assert!(!fits_signed(32, 6));
    assert!(fits_signed(-32, 6));
    assert!(!fits_signed(-33, 6));
  }

  #[test]
  fn codeword_fields_fit_their_declared_widths() {
    // The widths actually used by codeword.rs
    assert!(fits_unsigned(63, 6)); // a_q max
    assert!(fits_signed(30, 6) && fits_signed(-30, 6)); // b_q/c_q/d_q range (+-0.3*50)
    assert!(fits_unsigned(15, 4)); // chroma index max
  }
}
