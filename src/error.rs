// Error types for the comp40img codec.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Comp40Error>;

// Errors that can surface from the compress/decompress pipelines and the
// PPM/container adapters.
//
// Internal invariants that can only be violated by a bug in this crate's
// own pipeline code (not by untrusted input) stay as assert!/
// debug_assert! rather than becoming a variant here.
#[derive(Debug, Error)]
pub enum Comp40Error {
  #[error("{stage}: malformed input: {detail}")]
  MalformedInput { stage: &'static str, detail: String },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("{stage}: precondition violated: {detail}")]
  PreconditionViolation { stage: &'static str, detail: String },
}

impl Comp40Error {
  pub fn malformed(stage: &'static str, detail: impl Into<String>) -> Self {
    Comp40Error::MalformedInput { stage, detail: detail.into() }
  }

  pub fn precondition(stage: &'static str, detail: impl Into<String>) -> Self {
    Comp40Error::PreconditionViolation { stage, detail: detail.into() }
  }
}
