//! The standard operation sets.

use crate::operations::{Deletion, Insertion, Match, Operation, Substitution, Transposition};
use lazy_static::lazy_static;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter};
use thiserror::Error;

lazy_static! {
    /// Unit cost insertions, deletions and substitutions.
    pub static ref LEVENSHTEIN: Vec<Operation> = vec![
        Match::default().into(),
        Insertion { cost: 1 }.into(),
        Deletion { cost: 1 }.into(),
        Substitution { cost: 1 }.into(),
    ];

    /// [LEVENSHTEIN] plus unit cost transpositions of adjacent elements.
    pub static ref DAMERAU_LEVENSHTEIN: Vec<Operation> = vec![
        Match::default().into(),
        Insertion { cost: 1 }.into(),
        Deletion { cost: 1 }.into(),
        Substitution { cost: 1 }.into(),
        Transposition { cost: 1 }.into(),
    ];

    /// Insertions and deletions only.
    ///
    /// Without substitutions, replacing an element costs a deletion and an insertion.
    pub static ref LCS: Vec<Operation> = vec![
        Match::default().into(),
        Insertion { cost: 1 }.into(),
        Deletion { cost: 1 }.into(),
    ];
}

/// Names for the standard operation sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Levenshtein,
    #[serde(alias = "damerau")]
    DamerauLevenshtein,
    #[serde(alias = "indel")]
    Lcs,
}

/// Every accepted spelling of a preset name
static PRESET_NAMES: phf::Map<&'static str, Preset> = phf_map! {
    "levenshtein" => Preset::Levenshtein,
    "lev" => Preset::Levenshtein,
    "damerau_levenshtein" => Preset::DamerauLevenshtein,
    "damerau-levenshtein" => Preset::DamerauLevenshtein,
    "damerau" => Preset::DamerauLevenshtein,
    "dl" => Preset::DamerauLevenshtein,
    "lcs" => Preset::Lcs,
    "indel" => Preset::Lcs,
};

impl Preset {
    /// The operations that make up the preset.
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Preset::Levenshtein => LEVENSHTEIN.as_slice(),
            Preset::DamerauLevenshtein => DAMERAU_LEVENSHTEIN.as_slice(),
            Preset::Lcs => LCS.as_slice(),
        }
    }

    /// A human readable summary of the preset.
    pub fn description(self) -> &'static str {
        match self {
            Preset::Levenshtein => "insertions, deletions and substitutions",
            Preset::DamerauLevenshtein => {
                "insertions, deletions, substitutions and adjacent transpositions"
            }
            Preset::Lcs => "insertions and deletions only",
        }
    }
}

/// The error returned when a string doesn't name a known preset.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a known operation preset")]
pub struct UnknownPresetError(pub String);

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESET_NAMES
            .get(s.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnknownPresetError(s.into()))
    }
}
