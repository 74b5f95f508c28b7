//! Helper functions for dealing with the terminal

use console::{set_colors_enabled, set_colors_enabled_stderr};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Whether the output to the terminal should be colored
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ColorOutputPolicy {
    /// Automatically enable color if printing to a TTY, otherwise disable color
    #[default]
    Auto,
    /// Force plaintext output
    Off,
    /// Force color output
    On,
}

impl ColorOutputPolicy {
    /// Whether colors should be forced on or off, or [None] if console should decide.
    fn forced(self) -> Option<bool> {
        match self {
            ColorOutputPolicy::Auto => None,
            ColorOutputPolicy::On => Some(true),
            ColorOutputPolicy::Off => Some(false),
        }
    }
}

/// Set terminal color settings based on the output policy.
///
/// With [`ColorOutputPolicy::Auto`] the settings are left alone, and `console` enables colors
/// only when the stream is a TTY.
pub fn set_term_colors(setting: ColorOutputPolicy) {
    if let Some(colors_enabled) = setting.forced() {
        set_colors_enabled(colors_enabled);
        set_colors_enabled_stderr(colors_enabled);
    }
}
