// Chroma quantizer: a fixed, monotonic table mapping a chroma average in
// [-0.5, 0.5] to a 4-bit index, such that chroma_of_index always lands
// back in [-0.5, 0.5] and the pair round-trips within one quantization
// step. A uniform 16-level table satisfies that contract.

const LEVELS: u8 = 16;
const LO: f32 = -0.5;
const HI: f32 = 0.5;

fn step() -> f32 {
  (HI - LO) / (LEVELS as f32 - 1.0)
}

// Map a chroma average in [-0.5, 0.5] to its nearest 4-bit index.
pub fn index_of_chroma(x: f32) -> u8 {
  let x = crate::util::clamp(x, LO, HI);
  let raw = ((x - LO) / step()).round();
  crate::util::clamp(raw, 0.0, (LEVELS - 1) as f32) as u8
}

// Map a 4-bit index back to its representative chroma value, always
// within [-0.5, 0.5].
pub fn chroma_of_index(i: u8) -> f32 {
  assert!(i < LEVELS);
  LO + (i as f32) * step()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn indices_are_monotonic_in_input() {
    let mut prev = index_of_chroma(LO);
    for i in 1..=200 {
      let x = LO + (i as f32) * (HI - LO) / 200.0;
      let idx = index_of_chroma(x);
      assert!(idx >= prev);
      prev = idx;
    }
  }

  #[test]
  fn chroma_of_index_stays_in_range() {
    for i in 0..LEVELS {
      let v = chroma_of_index(i);
      assert!((LO..=HI).contains(&v));
    }
  }

  #[test]
  fn round_trip_within_one_step() {
    for i in 0..LEVELS {
      let v = chroma_of_index(i);
      let back = index_of_chroma(v);
      assert_eq!(back, i);
    }
  }

  #[test]
  fn endpoints_map_to_endpoint_indices() {
    assert_eq!(index_of_chroma(LO), 0);
    assert_eq!(index_of_chroma(HI), LEVELS - 1);
  }
}
