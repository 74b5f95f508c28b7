use super::DisplayData;
use crate::matrix::{Cost, Idx2D};
use crate::operations::EditOperation;
use crate::render::Renderer;
use console::Term;
use logging_timer::time;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A renderer that outputs json data about the result.
///
/// This can be useful if you want to use `jq` or do some programatic analysis on the results.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Json {
    /// Whether to pretty print the output JSON.
    pub pretty_print: bool,
}

/// One step of the edit script, as it appears in the output.
#[derive(Serialize, Debug)]
struct JsonStep<'a> {
    operation: &'a str,
    cost: Cost,
    from: Idx2D,
    to: Idx2D,
}

/// The document the renderer emits.
#[derive(Serialize, Debug)]
struct JsonDocument<'a> {
    distance: Cost,
    source: Vec<String>,
    target: Vec<String>,
    matrix: Vec<&'a [Cost]>,
    script: Vec<JsonStep<'a>>,
}

impl<'a> JsonDocument<'a> {
    fn new(data: &DisplayData<'a>) -> Self {
        let pair = data.pair;
        JsonDocument {
            distance: data.matrix.distance(),
            source: (0..pair.source_len())
                .map(|i| pair.source_label(i))
                .collect(),
            target: (0..pair.target_len())
                .map(|j| pair.target_label(j))
                .collect(),
            matrix: data.matrix.iter_rows().collect(),
            script: data
                .script
                .steps()
                .map(|step| JsonStep {
                    operation: step.operation.name(),
                    cost: step.operation.cost(),
                    from: step.from,
                    to: step.to,
                })
                .collect(),
        }
    }
}

impl Renderer for Json {
    fn render(
        &self,
        writer: &mut dyn Write,
        data: &DisplayData,
        _term_info: Option<&Term>,
    ) -> anyhow::Result<()> {
        let json_str = self.generate_json_str(data)?;
        writeln!(writer, "{}", &json_str)?;
        Ok(())
    }
}

impl Json {
    /// Create a JSON string from the display data.
    ///
    /// This method handles display options that are set in the config.
    #[time("trace")]
    fn generate_json_str(&self, data: &DisplayData) -> Result<String, serde_json::Error> {
        let document = JsonDocument::new(data);

        if self.pretty_print {
            return serde_json::to_string_pretty(&document);
        }
        serde_json::to_string(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::presets::DAMERAU_LEVENSHTEIN;
    use crate::sequence::Runes;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    #[test]
    fn test_document_contents() {
        let pair = Runes::new("ab", "ba");
        let matrix = Matrix::build(&pair, &DAMERAU_LEVENSHTEIN).unwrap();
        let script = matrix.edit_script(&pair, &DAMERAU_LEVENSHTEIN).unwrap();
        let data = DisplayData {
            pair: &pair,
            matrix: &matrix,
            script: &script,
        };
        let output = Json::default().generate_json_str(&data).unwrap();
        let actual: Value = serde_json::from_str(&output).unwrap();

        let expected = json!({
            "distance": 1,
            "source": ["a", "b"],
            "target": ["b", "a"],
            "matrix": [[0, 1, 2], [1, 1, 1], [2, 1, 1]],
            "script": [
                {"operation": "trp", "cost": 1, "from": [0, 0], "to": [2, 2]}
            ]
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_pretty_print() {
        let pair = Runes::new("", "");
        let matrix = Matrix::build(&pair, &DAMERAU_LEVENSHTEIN).unwrap();
        let script = matrix.edit_script(&pair, &DAMERAU_LEVENSHTEIN).unwrap();
        let data = DisplayData {
            pair: &pair,
            matrix: &matrix,
            script: &script,
        };
        let renderer = Json { pretty_print: true };
        insta::assert_snapshot!(renderer.generate_json_str(&data).unwrap(), @r#"
        {
          "distance": 0,
          "source": [],
          "target": [],
          "matrix": [
            [
              0
            ]
          ],
          "script": []
        }
        "#);
    }
}
