//! Sequence pairs: the read-only views the edit distance engine operates on.
//!
//! The matrix builder and backtracker never look at concrete elements. They only ask for the two
//! lengths and whether a source element equals a target element, which is what [SequencePair]
//! exposes. Anything that can answer those three questions can be diffed.

use unicode_segmentation::UnicodeSegmentation;

/// A pair of sequences that can be compared element-wise.
///
/// Indices passed to [`SequencePair::equal`] must be in `0..source_len()` and `0..target_len()`
/// respectively. Implementations are expected to panic on out-of-range indices rather than
/// return a made-up answer.
pub trait SequencePair {
    /// The number of elements in the source sequence.
    fn source_len(&self) -> usize;

    /// The number of elements in the target sequence.
    fn target_len(&self) -> usize;

    /// Whether the source element at `i` equals the target element at `j`.
    fn equal(&self, i: usize, j: usize) -> bool;
}

/// A sequence pair whose elements can be displayed.
///
/// This is only used for presentation, the algorithm itself never needs labels.
pub trait LabeledSequencePair: SequencePair {
    /// The display string for the source element at `i`.
    fn source_label(&self, i: usize) -> String;

    /// The display string for the target element at `j`.
    fn target_label(&self, j: usize) -> String;
}

/// A pair of strings broken up into code points.
///
/// Storing the `char`s up front means indexing is O(1), unlike indexing into a UTF-8 `str`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Runes {
    pub source: Vec<char>,
    pub target: Vec<char>,
}

impl Runes {
    pub fn new(source: &str, target: &str) -> Self {
        Runes {
            source: source.chars().collect(),
            target: target.chars().collect(),
        }
    }
}

impl SequencePair for Runes {
    fn source_len(&self) -> usize {
        self.source.len()
    }

    fn target_len(&self) -> usize {
        self.target.len()
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        self.source[i] == self.target[j]
    }
}

impl LabeledSequencePair for Runes {
    fn source_label(&self, i: usize) -> String {
        self.source[i].to_string()
    }

    fn target_label(&self, j: usize) -> String {
        self.target[j].to_string()
    }
}

/// A pair of token sequences, compared token by token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Words {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl Words {
    pub fn new<S: Into<String>>(
        source: impl IntoIterator<Item = S>,
        target: impl IntoIterator<Item = S>,
    ) -> Self {
        Words {
            source: source.into_iter().map(Into::into).collect(),
            target: target.into_iter().map(Into::into).collect(),
        }
    }

    /// Tokenize two texts on word boundaries.
    ///
    /// Punctuation is kept as its own token, whitespace is dropped.
    ///
    /// ```rust
    /// use libeditdist::sequence::Words;
    /// let words = Words::from_text("Hello, world", "Hello world!");
    /// assert_eq!(words.source, vec!["Hello", ",", "world"]);
    /// assert_eq!(words.target, vec!["Hello", "world", "!"]);
    /// ```
    pub fn from_text(source: &str, target: &str) -> Self {
        Words {
            source: tokenize(source),
            target: tokenize(target),
        }
    }
}

/// Split text into word-bound segments, skipping segments that are only whitespace.
fn tokenize(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .map(String::from)
        .collect()
}

impl SequencePair for Words {
    fn source_len(&self) -> usize {
        self.source.len()
    }

    fn target_len(&self) -> usize {
        self.target.len()
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        self.source[i] == self.target[j]
    }
}

impl LabeledSequencePair for Words {
    fn source_label(&self, i: usize) -> String {
        self.source[i].clone()
    }

    fn target_label(&self, j: usize) -> String {
        self.target[j].clone()
    }
}

/// A borrowed pair of arbitrary slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slices<'a, T> {
    pub source: &'a [T],
    pub target: &'a [T],
}

impl<'a, T> Slices<'a, T> {
    pub fn new(source: &'a [T], target: &'a [T]) -> Self {
        Slices { source, target }
    }
}

impl<T: PartialEq> SequencePair for Slices<'_, T> {
    fn source_len(&self) -> usize {
        self.source.len()
    }

    fn target_len(&self) -> usize {
        self.target.len()
    }

    fn equal(&self, i: usize, j: usize) -> bool {
        self.source[i] == self.target[j]
    }
}

impl<T: PartialEq + ToString> LabeledSequencePair for Slices<'_, T> {
    fn source_label(&self, i: usize) -> String {
        self.source[i].to_string()
    }

    fn target_label(&self, j: usize) -> String {
        self.target[j].to_string()
    }
}
