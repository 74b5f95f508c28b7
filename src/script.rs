//! Edit scripts, and recovering them from a filled cost matrix.

use crate::matrix::{Cost, Idx2D, Matrix};
use crate::operations::{EditOperation, Emitted, Operation};
use crate::sequence::SequencePair;
use log::{debug, trace};
use logging_timer::time;
use std::collections::VecDeque;
use thiserror::Error;

/// One edit in a script: the operation, and the cells it moves between.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O = Operation> {
    /// The operation that produced `to`
    pub operation: O,
    /// The cell the operation starts from
    pub from: Idx2D,
    /// The cell the operation produces
    pub to: Idx2D,
}

/// An ordered list of edits that turns the source sequence into the target sequence.
///
/// Steps are stored in source-to-target order.
#[derive(Debug, Clone, PartialEq)]
pub struct EditScript<O = Operation>(pub VecDeque<Step<O>>);

impl<O> Default for EditScript<O> {
    fn default() -> Self {
        EditScript(VecDeque::new())
    }
}

impl<O: EditOperation> EditScript<O> {
    /// The total cost of the script, which is the sum of each operation's cost.
    ///
    /// The sum saturates at [Cost::MAX].
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.0
            .iter()
            .fold(0, |total: Cost, step| total.saturating_add(step.operation.cost()))
    }

    /// Iterate through the steps of the script.
    pub fn steps(&self) -> impl Iterator<Item = &Step<O>> {
        self.0.iter()
    }

    /// Iterate through the operations of the script.
    pub fn operations(&self) -> impl Iterator<Item = &O> {
        self.0.iter().map(|step| &step.operation)
    }

    /// The number of steps in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the script has no steps, which only happens when both sequences are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply the script to `source`.
    ///
    /// Elements that are kept or moved are taken from `source`, and only elements that are
    /// inserted or substituted are taken from `target`. For a script computed from `source` and
    /// `target` this returns a copy of `target`.
    ///
    /// # Panics
    ///
    /// If the slices are shorter than the sequences the script was computed from.
    pub fn replay<T: Clone>(&self, source: &[T], target: &[T]) -> Vec<T> {
        let mut output = Vec::with_capacity(target.len());

        for step in &self.0 {
            for emitted in step.operation.emitted(step.from, step.to) {
                match emitted {
                    Emitted::Source(i) => output.push(source[i].clone()),
                    Emitted::Target(j) => output.push(target[j].clone()),
                }
            }
        }
        output
    }
}

/// Errors that come up when walking back through a cost matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BacktrackError {
    #[error(
        "The matrix is {actual_rows}x{actual_cols} but the sequence pair needs {expected_rows}x{expected_cols}"
    )]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
    #[error("No operation reproduces the cost {cost} stored at cell ({row}, {col})")]
    NoProducingOperation { row: usize, col: usize, cost: Cost },
    #[error("Operation '{operation}' at cell ({row}, {col}) does not move towards the origin")]
    NoProgress {
        operation: String,
        row: usize,
        col: usize,
    },
}

/// Recover an optimal edit script from a filled cost matrix.
///
/// This walks from the bottom right cell to the origin. At each cell the operations are tried in
/// the order they appear in `ops`, and the first one that reproduces the stored cost is taken, so
/// the order of the set decides between equally cheap scripts.
///
/// `pair` and `ops` have to be the ones `matrix` was built with. Operations like [Match] check
/// the sequences again while walking back, so a mismatched pair shows up as an error instead of
/// a bogus script.
///
/// [Match]: crate::operations::Match
#[time("info", "script::{}")]
pub fn edit_script<O: EditOperation + Clone>(
    matrix: &Matrix,
    pair: &dyn SequencePair,
    ops: &[O],
) -> Result<EditScript<O>, BacktrackError> {
    let expected = (pair.source_len() + 1, pair.target_len() + 1);

    if (matrix.rows(), matrix.cols()) != expected {
        return Err(BacktrackError::DimensionMismatch {
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: matrix.rows(),
            actual_cols: matrix.cols(),
        });
    }

    let mut steps = VecDeque::new();
    let mut current = matrix.terminal();

    // Each step has to strictly decrease `row + col`, so the walk takes at most
    // `source_len + target_len` steps.
    while current != (0, 0) {
        let (row, col) = current;
        let cost = matrix[current];
        let (op, previous) = ops
            .iter()
            .find_map(|op| {
                let candidate = op.apply(pair, matrix, current)?;
                (candidate == cost).then(|| (op, op.backtrack(current)))
            })
            .ok_or(BacktrackError::NoProducingOperation { row, col, cost })?;

        let moves_back = previous.0 <= row && previous.1 <= col;
        if !moves_back || previous.0 + previous.1 >= row + col {
            return Err(BacktrackError::NoProgress {
                operation: op.name().to_string(),
                row,
                col,
            });
        }
        trace!(
            "Backtracked from {:?} to {:?} with '{}'",
            current,
            previous,
            op.name()
        );
        steps.push_front(Step {
            operation: op.clone(),
            from: previous,
            to: current,
        });
        current = previous;
    }
    debug!("Recovered an edit script with {} steps", steps.len());
    Ok(EditScript(steps))
}
