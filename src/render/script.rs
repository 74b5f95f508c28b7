use super::{ColorDef, DisplayData, Renderer};
use crate::operations::{EditOperation, Operation};
use crate::script::Step;
use crate::sequence::LabeledSequencePair;
use console::{Color, Style, Term};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A renderer that prints the edit script one step per line.
///
/// Each line holds the operation's name, the source elements it consumed and the target elements
/// it produced, followed by a final line with the total distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Script {
    /// Whether steps that keep an element unchanged are printed
    pub show_matches: bool,

    /// The color for steps that only produce target elements
    #[serde(with = "ColorDef")]
    pub addition_color: Color,

    /// The color for steps that only consume source elements
    #[serde(with = "ColorDef")]
    pub deletion_color: Color,

    /// The color for every other step that changes the sequence
    #[serde(with = "ColorDef")]
    pub change_color: Color,
}

impl Default for Script {
    fn default() -> Self {
        Script {
            show_matches: true,
            addition_color: Color::Green,
            deletion_color: Color::Red,
            change_color: Color::Yellow,
        }
    }
}

/// How a step changes the sequence, which decides how it's styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Kept,
    Addition,
    Deletion,
    Change,
}

impl StepKind {
    fn of(step: &Step) -> Self {
        if matches!(step.operation, Operation::Match(_)) {
            return StepKind::Kept;
        }
        let consumed_source = step.to.0 - step.from.0;
        let produced_target = step.to.1 - step.from.1;

        match (consumed_source, produced_target) {
            (0, _) => StepKind::Addition,
            (_, 0) => StepKind::Deletion,
            _ => StepKind::Change,
        }
    }
}

impl Script {
    fn style(&self, kind: StepKind) -> Style {
        match kind {
            StepKind::Kept => Style::new(),
            StepKind::Addition => Style::new().fg(self.addition_color),
            StepKind::Deletion => Style::new().fg(self.deletion_color),
            StepKind::Change => Style::new().fg(self.change_color),
        }
    }

    /// Format a single step, without any styling.
    fn format_step(step: &Step, pair: &dyn LabeledSequencePair) -> String {
        let consumed: Vec<String> = (step.from.0..step.to.0)
            .map(|i| pair.source_label(i))
            .collect();
        let produced: Vec<String> = (step.from.1..step.to.1)
            .map(|j| pair.target_label(j))
            .collect();
        let line = format!(
            "{:<5} {} -> {}",
            step.operation.name(),
            consumed.join(" "),
            produced.join(" ")
        );
        line.trim_end().to_string()
    }
}

impl Renderer for Script {
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        _term_info: Option<&Term>,
    ) -> anyhow::Result<()> {
        for step in data.script.steps() {
            let kind = StepKind::of(step);

            if kind == StepKind::Kept && !self.show_matches {
                continue;
            }
            let line = Self::format_step(step, data.pair);
            writeln!(writer, "{}", self.style(kind).apply_to(line))?;
        }
        writeln!(writer, "distance: {}", data.matrix.distance())?;
        Ok(())
    }
}
