//! The supporting library for `editdist`.
//!
//! This crate computes generalized edit distances between two sequences and recovers the edit
//! scripts that realize them. The sequences can be anything that implements
//! [`SequencePair`](sequence::SequencePair), and the cost model is whatever set of
//! [`EditOperation`](operations::EditOperation)s the caller passes in.
//!
//! ```rust
//! use libeditdist::{distance, presets::{DAMERAU_LEVENSHTEIN, LEVENSHTEIN}, sequence::Runes};
//!
//! let pair = Runes::new("ab", "ba");
//! assert_eq!(distance(&pair, &LEVENSHTEIN).unwrap(), 2);
//! assert_eq!(distance(&pair, &DAMERAU_LEVENSHTEIN).unwrap(), 1);
//! ```
//!
//! If you want the script as well as the distance, build the [Matrix] once and reuse it:
//!
//! ```rust
//! use libeditdist::{Matrix, presets::LEVENSHTEIN, sequence::Words};
//!
//! let words = Words::new(["Hello", "Word"], ["Hello", "Beautiful", "Word"]);
//! let matrix = Matrix::build(&words, &LEVENSHTEIN).unwrap();
//! let script = matrix.edit_script(&words, &LEVENSHTEIN).unwrap();
//! assert_eq!(matrix.distance(), 1);
//! assert_eq!(script.replay(&words.source, &words.target), words.target);
//! ```

pub mod cli;
pub mod config;
pub mod console_utils;
mod figment_utils;
pub mod matrix;
pub mod operations;
pub mod presets;
pub mod render;
pub mod script;
pub mod sequence;
pub mod string_utils;

#[cfg(test)]
mod test_utils;

pub use matrix::{BuildError, Cost, Idx2D, Matrix, build_matrix};
pub use script::{BacktrackError, EditScript, edit_script};

use operations::EditOperation;
use sequence::SequencePair;

/// Compute the edit distance between a pair of sequences.
///
/// This builds the whole cost matrix and returns the bottom right cell. Use [`Matrix::build`]
/// directly if you also need an edit script.
pub fn distance<O: EditOperation>(pair: &dyn SequencePair, ops: &[O]) -> Result<Cost, BuildError> {
    Ok(Matrix::build(pair, ops)?.distance())
}
