//! Code related to the CLI

use crate::config::Tokenizer;
use crate::console_utils::ColorOutputPolicy;
use crate::presets::Preset;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(author, version, about, subcommand_negates_reqs = true)]
pub struct Args {
    /// Print debug output
    ///
    /// This will print debug logs at the trace level. This is useful for debugging and bug
    /// reports should contain debug logging info.
    #[clap(short, long)]
    pub debug: bool,

    /// The sequence to transform
    ///
    /// This is literal text unless `--files` is set.
    #[clap(required = true)]
    pub source: Option<String>,

    /// The sequence to transform `source` into
    ///
    /// This is literal text unless `--files` is set.
    #[clap(required = true)]
    pub target: Option<String>,

    /// Treat SOURCE and TARGET as paths and compare the contents of the files
    #[clap(long)]
    pub files: bool,

    /// How the inputs are split into elements
    ///
    /// If this is not set, the tokenizer from the config is used.
    #[clap(short, long)]
    pub tokenizer: Option<Tokenizer>,

    /// The operation set to use
    ///
    /// This takes precedence over any operations in the config. Run `editdist list` to see the
    /// available presets.
    #[clap(short, long)]
    pub preset: Option<Preset>,

    /// Specify which renderer tag to use.
    ///
    /// For more details, check the config documentation for the `formatting` section.
    #[clap(short, long)]
    pub renderer: Option<String>,

    /// Manually set the file path for the config file
    #[clap(short, long, env = "EDITDIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore any config files and use the default config
    #[clap(short, long)]
    pub no_config: bool,

    /// Set the color output policy. Valid values are: "auto", "on", "off".
    ///
    /// "auto" will automatically detect whether colors should be applied by trying to determine
    /// whether the process is outputting to a TTY. "on" will enable output and "off" will
    /// disable color output regardless of whether the process detects a TTY.
    #[clap(long = "color-output", default_value_t = ColorOutputPolicy::default())]
    pub color_output: ColorOutputPolicy,

    /// Subcommands that don't compute a distance
    #[clap(subcommand)]
    pub cmd: Option<Command>,
}

/// Commands related to the configuration
#[derive(Debug, Eq, PartialEq, Clone, Copy, Subcommand)]
pub enum Command {
    /// List the operation presets
    List,

    /// Dump the default config to stdout
    DumpDefaultConfig,

    /// Generate shell completion scripts for editdist
    GenCompletion {
        /// The shell to generate completion scripts for.
        ///
        /// This will print the shell completion script to stdout. bash, zsh, fish, elvish, and
        /// powershell are supported.
        #[clap(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals_and_flags() {
        let args = Args::try_parse_from([
            "editdist", "-t", "words", "-p", "damerau", "-r", "script", "kitten", "sitting",
        ])
        .unwrap();
        assert_eq!(args.source.as_deref(), Some("kitten"));
        assert_eq!(args.target.as_deref(), Some("sitting"));
        assert_eq!(args.tokenizer, Some(Tokenizer::Words));
        assert_eq!(args.preset, Some(Preset::DamerauLevenshtein));
        assert_eq!(args.renderer.as_deref(), Some("script"));
        assert_eq!(args.color_output, ColorOutputPolicy::Auto);
        assert!(args.cmd.is_none());
    }

    #[test]
    fn test_subcommand_without_inputs() {
        let args = Args::try_parse_from(["editdist", "list"]).unwrap();
        assert_eq!(args.cmd, Some(Command::List));
        assert!(args.source.is_none());
    }

    #[test]
    fn test_inputs_are_required() {
        assert!(Args::try_parse_from(["editdist", "kitten"]).is_err());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(Args::try_parse_from(["editdist", "-p", "hamming", "a", "b"]).is_err());
    }
}
