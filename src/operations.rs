//! Edit operations and the cost model they define.
//!
//! An operation knows three things: whether it can produce a cell of the DP matrix, what that
//! would cost, and which cell it would have come from. The matrix builder and the backtracker
//! treat every operation the same way, so adding a new kind of edit never requires touching the
//! algorithm.

use crate::matrix::{Cost, Idx2D, Matrix};
use crate::sequence::SequencePair;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// An element written out when an edit script is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// The source element at the given index
    Source(usize),
    /// The target element at the given index
    Target(usize),
}

/// The built-in edit operations, plus an escape hatch for user-defined ones.
///
/// The order of operations in a set matters: when two operations can produce the same cost for a
/// cell, the backtracker picks whichever comes first.
#[enum_dispatch]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Match,
    Insertion,
    Deletion,
    Substitution,
    Transposition,
    #[serde(skip)]
    Custom(CustomOperation),
}

/// A single rule in the edit cost model.
///
/// `apply` must only read cells whose coordinates sum to less than `i + j`, and `backtrack` must
/// return such a cell. The builder fills the matrix in row-major order and the backtracker relies
/// on every step moving towards the origin, so an operation that breaks this is rejected when the
/// script is recovered.
#[enum_dispatch(Operation)]
pub trait EditOperation {
    /// A short name for the operation, used when displaying scripts.
    fn name(&self) -> &str;

    /// The cost this operation adds on top of its predecessor cell.
    fn cost(&self) -> Cost;

    /// The cost of producing `cell` with this operation, or [None] if the operation does not
    /// apply there.
    fn apply(&self, pair: &dyn SequencePair, matrix: &Matrix, cell: Idx2D) -> Option<Cost>;

    /// The cell this operation steps back to from `cell`.
    ///
    /// This is only meaningful if [`EditOperation::apply`] returned a cost for `cell`.
    fn backtrack(&self, cell: Idx2D) -> Idx2D;

    /// The elements this operation writes when replaying a script, for a step from `from` to `to`.
    ///
    /// By default the target elements the step covers are written out, which is right for
    /// insertions, deletions and substitutions.
    fn emitted(&self, from: Idx2D, to: Idx2D) -> Vec<Emitted> {
        (from.1..to.1).map(Emitted::Target).collect()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Operation {
    /// Wrap a user-defined operation so it can be mixed with the built-in ones.
    pub fn custom<T>(operation: T) -> Self
    where
        T: EditOperation + Send + Sync + 'static,
    {
        Operation::Custom(CustomOperation(Arc::new(operation)))
    }
}

/// The cost of moving diagonally from `(i - 1, j - 1)`.
fn diagonal(matrix: &Matrix, (i, j): Idx2D, cost: Cost) -> Cost {
    matrix[(i - 1, j - 1)].saturating_add(cost)
}

/// Keep an element that is identical in both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Match {
    pub cost: Cost,
}

impl EditOperation for Match {
    fn name(&self) -> &str {
        "match"
    }

    fn cost(&self) -> Cost {
        self.cost
    }

    fn apply(&self, pair: &dyn SequencePair, matrix: &Matrix, (i, j): Idx2D) -> Option<Cost> {
        if i > 0 && j > 0 && pair.equal(i - 1, j - 1) {
            return Some(diagonal(matrix, (i, j), self.cost));
        }
        None
    }

    fn backtrack(&self, (i, j): Idx2D) -> Idx2D {
        (i - 1, j - 1)
    }

    fn emitted(&self, from: Idx2D, _to: Idx2D) -> Vec<Emitted> {
        vec![Emitted::Source(from.0)]
    }
}

/// Insert the next target element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insertion {
    pub cost: Cost,
}

impl Default for Insertion {
    fn default() -> Self {
        Insertion { cost: 1 }
    }
}

impl EditOperation for Insertion {
    fn name(&self) -> &str {
        "ins"
    }

    fn cost(&self) -> Cost {
        self.cost
    }

    fn apply(&self, _pair: &dyn SequencePair, matrix: &Matrix, (i, j): Idx2D) -> Option<Cost> {
        if j > 0 {
            return Some(matrix[(i, j - 1)].saturating_add(self.cost));
        }
        None
    }

    fn backtrack(&self, (i, j): Idx2D) -> Idx2D {
        (i, j - 1)
    }
}

/// Drop the next source element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deletion {
    pub cost: Cost,
}

impl Default for Deletion {
    fn default() -> Self {
        Deletion { cost: 1 }
    }
}

impl EditOperation for Deletion {
    fn name(&self) -> &str {
        "del"
    }

    fn cost(&self) -> Cost {
        self.cost
    }

    fn apply(&self, _pair: &dyn SequencePair, matrix: &Matrix, (i, j): Idx2D) -> Option<Cost> {
        if i > 0 {
            return Some(matrix[(i - 1, j)].saturating_add(self.cost));
        }
        None
    }

    fn backtrack(&self, (i, j): Idx2D) -> Idx2D {
        (i - 1, j)
    }
}

/// Replace the next source element with the next target element.
///
/// This applies whether or not the two elements are equal, so a set that should prefer matches
/// has to list [Match] first or give it a lower cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Substitution {
    pub cost: Cost,
}

impl Default for Substitution {
    fn default() -> Self {
        Substitution { cost: 1 }
    }
}

impl EditOperation for Substitution {
    fn name(&self) -> &str {
        "sub"
    }

    fn cost(&self) -> Cost {
        self.cost
    }

    fn apply(&self, _pair: &dyn SequencePair, matrix: &Matrix, (i, j): Idx2D) -> Option<Cost> {
        if i > 0 && j > 0 {
            return Some(diagonal(matrix, (i, j), self.cost));
        }
        None
    }

    fn backtrack(&self, (i, j): Idx2D) -> Idx2D {
        (i - 1, j - 1)
    }
}

/// Swap two adjacent source elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transposition {
    pub cost: Cost,
}

impl Default for Transposition {
    fn default() -> Self {
        Transposition { cost: 1 }
    }
}

impl EditOperation for Transposition {
    fn name(&self) -> &str {
        "trp"
    }

    fn cost(&self) -> Cost {
        self.cost
    }

    fn apply(&self, pair: &dyn SequencePair, matrix: &Matrix, (i, j): Idx2D) -> Option<Cost> {
        if i > 1 && j > 1 && pair.equal(i - 1, j - 2) && pair.equal(i - 2, j - 1) {
            return Some(matrix[(i - 2, j - 2)].saturating_add(self.cost));
        }
        None
    }

    fn backtrack(&self, (i, j): Idx2D) -> Idx2D {
        (i - 2, j - 2)
    }

    fn emitted(&self, from: Idx2D, to: Idx2D) -> Vec<Emitted> {
        vec![Emitted::Source(to.0 - 1), Emitted::Source(from.0)]
    }
}

/// A shared handle to an operation defined outside this crate.
#[derive(Clone)]
pub struct CustomOperation(pub Arc<dyn EditOperation + Send + Sync>);

impl EditOperation for CustomOperation {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn cost(&self) -> Cost {
        self.0.cost()
    }

    fn apply(&self, pair: &dyn SequencePair, matrix: &Matrix, cell: Idx2D) -> Option<Cost> {
        self.0.apply(pair, matrix, cell)
    }

    fn backtrack(&self, cell: Idx2D) -> Idx2D {
        self.0.backtrack(cell)
    }

    fn emitted(&self, from: Idx2D, to: Idx2D) -> Vec<Emitted> {
        self.0.emitted(from, to)
    }
}

impl fmt::Debug for CustomOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomOperation")
            .field("name", &self.0.name())
            .field("cost", &self.0.cost())
            .finish()
    }
}

impl PartialEq for CustomOperation {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}
