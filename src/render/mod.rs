//! Utilities and modules related to rendering edit distance results.
//!
//! We have a modular system for displaying results to the terminal. Using this system makes it
//! much easier to extend with new formats that people may request.
//!
//! This library defines a fairly minimal interface for renderers: a single trait called
//! `Renderer`. From there implementers are free to do whatever they want with the matrix and the
//! edit script.

mod grid;
mod json;
mod script;

use self::grid::Grid;
use self::json::Json;
use self::script::Script;
use crate::matrix::Matrix;
use crate::script::EditScript;
use crate::sequence::LabeledSequencePair;
use anyhow::anyhow;
use console::{Color, Term};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use strum::{self, Display, EnumIter, EnumString};

pub use self::grid::GridLayout;

/// The parameters a [Renderer] instance receives to render a result.
#[derive(Clone, Copy)]
pub struct DisplayData<'a> {
    /// The sequences that were compared
    pub pair: &'a dyn LabeledSequencePair,
    /// The filled cost matrix
    pub matrix: &'a Matrix,
    /// The edit script recovered from `matrix`
    pub script: &'a EditScript,
}

#[enum_dispatch]
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Renderers {
    Grid,
    Script,
    Json,
}

impl Default for Renderers {
    fn default() -> Self {
        Renderers::Grid(Grid::default())
    }
}

/// An interface that renders the result of an edit distance computation.
#[enum_dispatch(Renderers)]
pub trait Renderer {
    /// Render a result.
    ///
    /// We use anyhow for errors so errors are free form for implementors, as they are not
    /// recoverable.
    ///
    /// `writer` can be any generic writer - it's not guaranteed that we're writing to a particular
    /// sink (could be a pager, stdout, etc). `data` holds the sequences, the matrix and the edit
    /// script. `term_info` is an optional reference to a term object that can be used by the
    /// renderer to access information about the terminal if the current process is a TTY output.
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        term_info: Option<&Term>,
    ) -> anyhow::Result<()>;
}

/// Write a cost matrix as a plain text grid.
///
/// The first row holds the target elements and the first column holds the source elements. Every
/// column is padded to the same width, which is wide enough for the largest cost and the longest
/// target label.
///
/// ```rust
/// use libeditdist::{Matrix, presets::LEVENSHTEIN, render::write_matrix, sequence::Runes};
/// let pair = Runes::new("ab", "b");
/// let matrix = Matrix::build(&pair, &LEVENSHTEIN).unwrap();
/// let mut out = Vec::new();
/// write_matrix(&matrix, &pair, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "      b\n   0  1\na  1  1\nb  2  1\n");
/// ```
pub fn write_matrix(
    matrix: &Matrix,
    pair: &dyn LabeledSequencePair,
    sink: &mut dyn Write,
) -> io::Result<()> {
    GridLayout::new(matrix, pair, None).write_plain(sink, matrix)
}

/// A copy of the [Color](console::Color) enum so we can serialize using serde, and get around the
/// orphan rule.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(remote = "Color", rename_all = "snake_case")]
#[derive(Default)]
enum ColorDef {
    Color256(u8),
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    TrueColor(u8, u8, u8),
}

impl From<ColorDef> for Color {
    fn from(c: ColorDef) -> Self {
        match c {
            ColorDef::Black => Color::Black,
            ColorDef::White => Color::White,
            ColorDef::Red => Color::Red,
            ColorDef::Green => Color::Green,
            ColorDef::Yellow => Color::Yellow,
            ColorDef::Blue => Color::Blue,
            ColorDef::Magenta => Color::Magenta,
            ColorDef::Cyan => Color::Cyan,
            ColorDef::Color256(c) => Color::Color256(c),
            ColorDef::TrueColor(r, g, b) => Color::TrueColor(r, g, b),
        }
    }
}

/// Workaround so we can use the `ColorDef` remote serialization mechanism with optional types
mod opt_color_def {
    use super::{Color, ColorDef};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Helper<'a>(#[serde(with = "ColorDef")] &'a Color);

        value.as_ref().map(Helper).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper(#[serde(with = "ColorDef")] Color);

        let helper = Option::deserialize(deserializer)?;
        Ok(helper.map(|Helper(external)| external))
    }
}

/// A helper function for the serde serializer
///
/// Due to the shenanigans we're using to serialize the optional color, we need to supply this
/// method so serde can infer a default value for an option when its key is missing.
fn default_option<T>() -> Option<T> {
    None
}

/// Configurations and templates for different configuration aliases
///
/// The user can define settings for each renderer as well as a default renderer.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(rename_all = "snake_case", default)]
pub struct RenderConfig {
    /// The default renderer to use.
    ///
    /// This is used if no renderer is specified at the command line.
    default: String,

    grid: Grid,
    script: Script,
    json: Json,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let default_renderer = Renderers::default();
        RenderConfig {
            default: default_renderer.to_string(),
            grid: Grid::default(),
            script: Script::default(),
            json: Json::default(),
        }
    }
}

impl RenderConfig {
    /// Get the renderer specified by the given tag.
    ///
    /// If the tag is not specified this will fall back to the default renderer.
    pub fn get_renderer(self, tag: Option<String>) -> anyhow::Result<Renderers> {
        let tag = tag.unwrap_or_else(|| self.default.clone());

        // Match the tag to the configured renderer, using the config values
        match tag.as_str() {
            "grid" => Ok(Renderers::Grid(self.grid)),
            "script" => Ok(Renderers::Script(self.script)),
            "json" => Ok(Renderers::Json(self.json)),
            _ => Err(anyhow!("'{}' is not a valid renderer", &tag)),
        }
    }
}
