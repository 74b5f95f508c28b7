//! The dynamic programming cost matrix.

use crate::operations::EditOperation;
use crate::script::{self, BacktrackError, EditScript};
use crate::sequence::SequencePair;
use log::{debug, trace};
use logging_timer::time;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// The cost of an edit, or of a sequence of edits.
pub type Cost = u32;

/// A type alias for an index in a two dimensional matrix, as `(row, column)`
pub type Idx2D = (usize, usize);

/// Errors that come up when filling the cost matrix.
///
/// These all mean the operation set doesn't fit the pair, rather than being something to recover
/// from at runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Cannot build a cost matrix from an empty operation set")]
    EmptyOperationSet,
    #[error("No operation in the set can produce cell ({row}, {col})")]
    Unreachable { row: usize, col: usize },
    #[error("The cost of cell ({row}, {col}) overflowed")]
    CostOverflow { row: usize, col: usize },
}

/// A dense matrix of costs.
///
/// `matrix[(i, j)]` is the cheapest way to turn the first `i` source elements into the first `j`
/// target elements, so row 0 and column 0 correspond to the empty prefixes. The cells are stored
/// in a single row-major buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<Cost>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a zeroed matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Fill the cost matrix for a pair of sequences.
    ///
    /// Cells are filled in row-major order. `(0, 0)` is always zero, and every other cell,
    /// including the first row and column, takes the cheapest cost any operation in `ops` can
    /// produce. This means the set has to contain something that can fill the first row (like an
    /// insertion) and something that can fill the first column (like a deletion).
    ///
    /// ```rust
    /// use libeditdist::{matrix::Matrix, presets::LEVENSHTEIN, sequence::Runes};
    /// let matrix = Matrix::build(&Runes::new("kitten", "sitting"), &LEVENSHTEIN).unwrap();
    /// assert_eq!(matrix.distance(), 3);
    /// ```
    #[time("info", "matrix::{}")]
    pub fn build<O: EditOperation>(pair: &dyn SequencePair, ops: &[O]) -> Result<Self, BuildError> {
        if ops.is_empty() {
            return Err(BuildError::EmptyOperationSet);
        }
        let rows = pair.source_len() + 1;
        let cols = pair.target_len() + 1;
        debug!(
            "Building a {}x{} cost matrix with {} operations",
            rows,
            cols,
            ops.len()
        );
        let mut matrix = Matrix::new(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                if i == 0 && j == 0 {
                    continue;
                }
                let lowest_cost = ops
                    .iter()
                    .filter_map(|op| op.apply(pair, &matrix, (i, j)))
                    .min()
                    .ok_or(BuildError::Unreachable { row: i, col: j })?;

                // Operations saturate instead of wrapping, so the max value is the only sign that
                // a cost didn't fit.
                if lowest_cost == Cost::MAX {
                    return Err(BuildError::CostOverflow { row: i, col: j });
                }
                matrix[(i, j)] = lowest_cost;
            }
        }
        trace!("Finished cost matrix: {:?}", matrix.data);
        Ok(matrix)
    }

    /// Recover an optimal edit script from this matrix.
    ///
    /// `pair` and `ops` must be the same ones the matrix was built with. See
    /// [`script::edit_script`].
    pub fn edit_script<O: EditOperation + Clone>(
        &self,
        pair: &dyn SequencePair,
        ops: &[O],
    ) -> Result<EditScript<O>, BacktrackError> {
        script::edit_script(self, pair, ops)
    }

    /// The number of rows, which is one more than the length of the source sequence.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns, which is one more than the length of the target sequence.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom right cell, which holds the cost of the whole transformation.
    #[must_use]
    pub fn terminal(&self) -> Idx2D {
        (self.rows.saturating_sub(1), self.cols.saturating_sub(1))
    }

    /// The edit distance between the two sequences.
    #[must_use]
    pub fn distance(&self) -> Cost {
        self[self.terminal()]
    }

    /// Get a cell, or [None] if the index is outside the matrix.
    pub fn get(&self, (row, col): Idx2D) -> Option<Cost> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Get a row of the matrix.
    ///
    /// # Panics
    ///
    /// If `row` is out of range.
    pub fn row(&self, row: usize) -> &[Cost] {
        assert!(
            row < self.rows,
            "row {row} is out of range for a matrix with {} rows",
            self.rows
        );
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate through the rows of the matrix, from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cost]> {
        (0..self.rows).map(|row| self.row(row))
    }

    /// The largest cost in the matrix.
    pub fn max_cost(&self) -> Cost {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Resolve a 2D index to the offset in the internal buffer.
    ///
    /// Both coordinates are checked so an out of range column can't silently alias a cell in the
    /// next row.
    fn offset(&self, (row, col): Idx2D) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) is out of range for a {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl Index<Idx2D> for Matrix {
    type Output = Cost;

    fn index(&self, idx: Idx2D) -> &Self::Output {
        &self.data[self.offset(idx)]
    }
}

impl IndexMut<Idx2D> for Matrix {
    fn index_mut(&mut self, idx: Idx2D) -> &mut Self::Output {
        let offset = self.offset(idx);
        &mut self.data[offset]
    }
}

/// Fill the cost matrix for a pair of sequences.
///
/// This is a convenience wrapper for [`Matrix::build`].
pub fn build_matrix<O: EditOperation>(
    pair: &dyn SequencePair,
    ops: &[O],
) -> Result<Matrix, BuildError> {
    Matrix::build(pair, ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{Deletion, Insertion, Match, Operation, Substitution};
    use crate::presets::{LCS, LEVENSHTEIN};
    use crate::sequence::Runes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_new_is_zeroed() {
        let matrix = Matrix::new(2, 3);
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        assert!(matrix.iter_rows().all(|row| row == [0, 0, 0]));
    }

    #[test]
    fn test_index_is_row_major() {
        let mut matrix = Matrix::new(2, 3);
        matrix[(1, 0)] = 7;
        assert_eq!(matrix.row(1), &[7, 0, 0]);
        assert_eq!(matrix.get((1, 0)), Some(7));
        assert_eq!(matrix.get((0, 3)), None);
    }

    #[test]
    #[should_panic]
    fn test_column_overflow() {
        let matrix = Matrix::new(2, 3);
        let _ = matrix[(0, 3)];
    }

    #[test]
    #[should_panic]
    fn test_row_overflow() {
        let matrix = Matrix::new(2, 3);
        let _ = matrix[(2, 0)];
    }

    #[rstest]
    #[case("", "")]
    #[case("abc", "")]
    #[case("", "abcd")]
    #[case("abc", "xyz")]
    fn test_boundaries(#[case] source: &str, #[case] target: &str) {
        let matrix = Matrix::build(&Runes::new(source, target), &LEVENSHTEIN).unwrap();

        for i in 0..matrix.rows() {
            assert_eq!(matrix[(i, 0)], i as Cost);
        }
        for j in 0..matrix.cols() {
            assert_eq!(matrix[(0, j)], j as Cost);
        }
    }

    #[test]
    fn test_weighted_boundaries() {
        let ops: Vec<Operation> = vec![
            Match::default().into(),
            Insertion { cost: 2 }.into(),
            Deletion { cost: 3 }.into(),
        ];
        let matrix = Matrix::build(&Runes::new("ab", "xyz"), &ops).unwrap();
        assert_eq!(matrix.row(0), &[0, 2, 4, 6]);
        assert_eq!(matrix[(1, 0)], 3);
        assert_eq!(matrix[(2, 0)], 6);
    }

    #[test]
    fn test_neighbour_matrix() {
        let ops: Vec<Operation> = vec![
            Match::default().into(),
            Insertion { cost: 1 }.into(),
            Deletion { cost: 1 }.into(),
            Substitution { cost: 2 }.into(),
        ];
        let matrix = Matrix::build(&Runes::new("neighbor", "Neighbour"), &ops).unwrap();
        let expected: Vec<Vec<Cost>> = vec![
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            vec![2, 3, 2, 3, 4, 5, 6, 7, 8, 9],
            vec![3, 4, 3, 2, 3, 4, 5, 6, 7, 8],
            vec![4, 5, 4, 3, 2, 3, 4, 5, 6, 7],
            vec![5, 6, 5, 4, 3, 2, 3, 4, 5, 6],
            vec![6, 7, 6, 5, 4, 3, 2, 3, 4, 5],
            vec![7, 8, 7, 6, 5, 4, 3, 2, 3, 4],
            vec![8, 9, 8, 7, 6, 5, 4, 3, 4, 3],
        ];
        let actual: Vec<Vec<Cost>> = matrix.iter_rows().map(<[Cost]>::to_vec).collect();
        assert_eq!(actual, expected);
        assert_eq!(matrix.distance(), 3);
        assert_eq!(matrix.max_cost(), 10);
    }

    #[test]
    fn test_lcs_has_no_substitution() {
        let matrix = Matrix::build(&Runes::new("a", "b"), &LCS).unwrap();
        assert_eq!(matrix.distance(), 2);
    }

    #[test]
    fn test_empty_operation_set() {
        let ops: Vec<Operation> = Vec::new();
        let res = Matrix::build(&Runes::new("a", "b"), &ops);
        assert_eq!(res, Err(BuildError::EmptyOperationSet));
    }

    #[test]
    fn test_missing_insertion_is_unreachable() {
        let ops: Vec<Operation> = vec![Match::default().into(), Deletion::default().into()];
        let res = Matrix::build(&Runes::new("a", "b"), &ops);
        assert_eq!(res, Err(BuildError::Unreachable { row: 0, col: 1 }));
    }

    #[test]
    fn test_overflow() {
        let ops: Vec<Operation> = vec![
            Insertion { cost: Cost::MAX }.into(),
            Deletion { cost: Cost::MAX }.into(),
        ];
        let res = Matrix::build(&Runes::new("a", "ab"), &ops);
        assert_eq!(res, Err(BuildError::CostOverflow { row: 0, col: 1 }));
    }
}
