//! Utilities and definitions for config handling

use crate::figment_utils::JsonProvider;
use crate::operations::Operation;
use crate::presets::Preset;
use crate::render::RenderConfig;
use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

#[cfg(target_os = "windows")]
use directories_next::ProjectDirs;

/// The expected filename for the config file
const CFG_FILE_NAME: &str = "config.json5";

/// The prefix for environment variables that override config values
///
/// Nested keys are separated with a double underscore, for example
/// `EDITDIST_FORMATTING__DEFAULT=json`.
const ENV_PREFIX: &str = "EDITDIST_";

/// How input text is broken up into sequence elements
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Tokenizer {
    /// Compare unicode code points
    #[default]
    Chars,
    /// Compare words and punctuation, ignoring whitespace
    Words,
}

/// The config struct for the application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// The standard operation set to use
    pub preset: Preset,

    /// An explicit operation set, in tie-break order
    ///
    /// If this is set it takes precedence over `preset`, so users can change the costs of
    /// individual operations.
    pub operations: Option<Vec<Operation>>,

    /// How input text is split into elements
    pub tokenizer: Tokenizer,

    /// Formatting options for display
    pub formatting: RenderConfig,
}

/// The possible errors that can arise when attempting to read a config
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("The file failed to deserialize")]
    DeserializationFailure(#[from] figment::Error),
    #[error("Failed to read the config file")]
    ReadFileFailure(#[from] io::Error),
    #[error("Unable to compute the default config file path")]
    NoDefault,
}

impl Config {
    /// Read a config from a given filepath, or fall back to the default file paths
    ///
    /// Values are layered: the defaults, then the file, then any `EDITDIST_` environment
    /// variables.
    pub fn try_from_file<P: AsRef<Path>>(path: Option<&P>) -> Result<Self, ReadError> {
        // If the user provided a path we use that, otherwise we fall back to the default file path
        let config_fp: PathBuf = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => default_config_file_path().map_err(|_| ReadError::NoDefault)?,
        };
        info!("Reading config at {}", config_fp.to_string_lossy());
        let config_contents = fs::read_to_string(&config_fp)?;
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(JsonProvider::string(&config_contents))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// The operation set to compute distances with.
    ///
    /// This is the explicit operation list if one was configured, otherwise the preset's.
    pub fn operations(&self) -> &[Operation] {
        match &self.operations {
            Some(ops) => ops.as_slice(),
            None => self.preset.operations(),
        }
    }
}

/// Return the default location for the config file (for *nix, Linux and MacOS), this will use
/// $XDG_CONFIG/.config, where `$XDG_CONFIG` is `$HOME/.config` by default.
#[cfg(not(target_os = "windows"))]
fn default_config_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("editdist");
    let file_path = xdg_dirs.place_config_file(CFG_FILE_NAME)?;
    Ok(file_path)
}

/// Return the default location for the config file (for windows), this will use
/// $XDG_CONFIG_HOME/.config, where `$XDG_CONFIG_HOME` is `$HOME/.config` by default.
#[cfg(target_os = "windows")]
fn default_config_file_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "editdist", "editdist")
        .ok_or_else(|| anyhow::anyhow!("Was not able to retrieve config path"))?;
    let mut config_file: PathBuf = proj_dirs.config_dir().into();
    config_file.push(CFG_FILE_NAME);
    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{Deletion, Insertion, Match, Substitution};
    use crate::presets::LCS;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_uses_levenshtein() {
        let config = Config::default();
        assert_eq!(config.preset, Preset::Levenshtein);
        assert_eq!(config.operations(), Preset::Levenshtein.operations());
    }

    #[test]
    fn test_explicit_operations_override_preset() {
        let ops: Vec<Operation> = vec![Match::default().into(), Insertion { cost: 2 }.into()];
        let config = Config {
            preset: Preset::Lcs,
            operations: Some(ops.clone()),
            ..Config::default()
        };
        assert_eq!(config.operations(), ops.as_slice());
    }

    #[test]
    fn test_missing_file_is_a_read_failure() {
        let res = Config::try_from_file(Some(&"/definitely/not/a/real/config.json5"));
        assert!(matches!(res, Err(ReadError::ReadFileFailure(_))));
    }

    #[test]
    fn test_malformed_file_fails_to_deserialize() {
        // Inside the jail so environment overrides from other tests can't leak in
        Jail::expect_with(|_jail| {
            let mut file = NamedTempFile::new().map_err(|e| e.to_string())?;
            write!(file, "{{ preset: 'hamming' }}").map_err(|e| e.to_string())?;
            let res = Config::try_from_file(Some(&file.path()));
            assert!(matches!(res, Err(ReadError::DeserializationFailure(_))));
            Ok(())
        });
    }

    #[test]
    fn test_file_layers_over_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.json5",
                r#"
                {
                    // partial configs only override what they name
                    preset: "lcs",
                    tokenizer: "words",
                    formatting: { default: "script" },
                }
                "#,
            )?;
            let config = Config::try_from_file(Some(&"config.json5"))
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(config.preset, Preset::Lcs);
            assert_eq!(config.tokenizer, Tokenizer::Words);
            assert_eq!(config.operations(), LCS.as_slice());
            assert_eq!(
                config.formatting.get_renderer(None).unwrap().to_string(),
                "script"
            );
            Ok(())
        });
    }

    #[test]
    fn test_explicit_operations_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.json5",
                r#"
                {
                    operations: [
                        { type: "match" },
                        { type: "insertion", cost: 1 },
                        { type: "deletion", cost: 1 },
                        { type: "substitution", cost: 2 },
                    ],
                }
                "#,
            )?;
            let config = Config::try_from_file(Some(&"config.json5"))
                .map_err(|e| figment::Error::from(e.to_string()))?;
            let expected: Vec<Operation> = vec![
                Match::default().into(),
                Insertion { cost: 1 }.into(),
                Deletion { cost: 1 }.into(),
                Substitution { cost: 2 }.into(),
            ];
            assert_eq!(config.operations(), expected.as_slice());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.json5", "{ preset: 'lcs' }")?;
            jail.set_env("EDITDIST_PRESET", "damerau");
            jail.set_env("EDITDIST_FORMATTING__DEFAULT", "json");

            let config = Config::try_from_file(Some(&"config.json5"))
                .map_err(|e| figment::Error::from(e.to_string()))?;
            assert_eq!(config.preset, Preset::DamerauLevenshtein);
            assert_eq!(
                config.formatting.get_renderer(None).unwrap().to_string(),
                "json"
            );
            Ok(())
        });
    }
}
