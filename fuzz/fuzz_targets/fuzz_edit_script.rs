#![no_main]

use libeditdist::{Matrix, presets::Preset, sequence::Runes};
use libfuzzer_sys::fuzz_target;

/// Longer inputs only make each run slower without reaching new code.
const MAX_CHARS: usize = 64;

fuzz_target!(|data: (String, String, u8)| {
    let (source, target, preset) = data;
    if source.chars().count() > MAX_CHARS || target.chars().count() > MAX_CHARS {
        return;
    }
    let preset = match preset % 3 {
        0 => Preset::Levenshtein,
        1 => Preset::DamerauLevenshtein,
        _ => Preset::Lcs,
    };
    let ops = preset.operations();
    let pair = Runes::new(&source, &target);
    let matrix = Matrix::build(&pair, ops).expect("presets fill every cell");
    let script = matrix
        .edit_script(&pair, ops)
        .expect("presets can always backtrack");

    assert_eq!(script.cost(), matrix.distance());
    assert_eq!(script.replay(&pair.source, &pair.target), pair.target);
});
