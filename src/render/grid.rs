use super::{ColorDef, DisplayData, Renderer, default_option, opt_color_def};
use crate::matrix::{Cost, Idx2D, Matrix};
use crate::sequence::LabeledSequencePair;
use crate::string_utils::truncate_str;
use console::{Alignment, Color, Style, Term, measure_text_width, pad_str};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{self, Write};
use std::iter;

/// The fill string used when a label is too wide for its column.
const TRUNCATION_FILL: &str = "..";

/// A renderer that prints the full cost matrix, with the cells on the edit path highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Grid {
    /// Whether to highlight the cells the edit script passes through
    pub highlight_path: bool,

    /// The foreground color of highlighted cells
    #[serde(with = "ColorDef")]
    pub path_foreground: Color,

    /// The background color of highlighted cells
    #[serde(with = "opt_color_def", default = "default_option")]
    pub path_background: Option<Color>,

    /// Whether highlighted cells are emboldened
    pub bold: bool,

    /// Labels wider than this are truncated in the middle.
    pub max_label_width: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            highlight_path: true,
            path_foreground: Color::Yellow,
            path_background: None,
            bold: true,
            max_label_width: 12,
        }
    }
}

impl Grid {
    fn path_style(&self) -> Style {
        let mut style = Style::new().fg(self.path_foreground);

        if let Some(color) = self.path_background {
            style = style.bg(color);
        }
        if self.bold {
            style = style.bold();
        }
        style
    }
}

impl Renderer for Grid {
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        _term_info: Option<&Term>,
    ) -> anyhow::Result<()> {
        let layout = GridLayout::new(data.matrix, data.pair, Some(self.max_label_width));
        let path: HashSet<Idx2D> = if self.highlight_path {
            iter::once((0, 0))
                .chain(data.script.steps().map(|step| step.to))
                .collect()
        } else {
            HashSet::new()
        };
        debug!("Highlighting {} cells on the edit path", path.len());
        layout.write(writer, data.matrix, &path, &self.path_style())?;
        Ok(())
    }
}

/// The labels and column widths needed to print a matrix as an aligned grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    source_labels: Vec<String>,
    target_labels: Vec<String>,
    /// The width of the leftmost column, which holds the source labels
    label_width: usize,
    /// The width of every other column
    cell_width: usize,
}

impl GridLayout {
    /// Compute the layout for a matrix, optionally truncating labels that are wider than
    /// `max_label_width`.
    pub fn new(
        matrix: &Matrix,
        pair: &dyn LabeledSequencePair,
        max_label_width: Option<usize>,
    ) -> Self {
        let label = |s: String| match max_label_width {
            Some(width) => truncate_str(&s, width.max(TRUNCATION_FILL.len()), TRUNCATION_FILL),
            None => s,
        };
        let source_labels: Vec<String> = (0..pair.source_len())
            .map(|i| label(pair.source_label(i)))
            .collect();
        let target_labels: Vec<String> = (0..pair.target_len())
            .map(|j| label(pair.target_label(j)))
            .collect();

        let label_width = widest(&source_labels).max(1);
        let cell_width = widest(&target_labels)
            .max(digits(matrix.max_cost()))
            .max(2);

        GridLayout {
            source_labels,
            target_labels,
            label_width,
            cell_width,
        }
    }

    /// Write the grid without any styling.
    pub fn write_plain(&self, writer: &mut dyn Write, matrix: &Matrix) -> io::Result<()> {
        self.write(writer, matrix, &HashSet::new(), &Style::new())
    }

    /// Write the grid, applying `style` to every cell in `highlighted`.
    fn write(
        &self,
        writer: &mut dyn Write,
        matrix: &Matrix,
        highlighted: &HashSet<Idx2D>,
        style: &Style,
    ) -> io::Result<()> {
        // The header skips the label column and the column for the empty target prefix
        write!(
            writer,
            "{} {}",
            " ".repeat(self.label_width),
            " ".repeat(self.cell_width)
        )?;
        for label in &self.target_labels {
            write!(
                writer,
                " {}",
                pad_str(label, self.cell_width, Alignment::Right, None)
            )?;
        }
        writeln!(writer)?;

        for (i, row) in matrix.iter_rows().enumerate() {
            // Row 0 is the empty source prefix, which has no label
            let label = if i == 0 {
                ""
            } else {
                self.source_labels[i - 1].as_str()
            };
            write!(
                writer,
                "{}",
                pad_str(label, self.label_width, Alignment::Left, None)
            )?;

            for (j, cost) in row.iter().enumerate() {
                let cell = pad_str(
                    &cost.to_string(),
                    self.cell_width,
                    Alignment::Right,
                    None,
                )
                .into_owned();

                if highlighted.contains(&(i, j)) {
                    write!(writer, " {}", style.apply_to(cell))?;
                } else {
                    write!(writer, " {cell}")?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// The display width of the widest label.
fn widest(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|s| measure_text_width(s))
        .max()
        .unwrap_or(0)
}

/// The number of decimal digits needed to print a cost.
fn digits(cost: Cost) -> usize {
    cost.checked_ilog10().map_or(1, |log| log as usize + 1)
}
