use ::console::Term;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::FromArgMatches;
#[cfg(panic = "unwind")]
use human_panic::setup_panic;
use libeditdist::cli::{self, Args};
use libeditdist::config::{Config, ReadError, Tokenizer};
use libeditdist::console_utils;
use libeditdist::matrix::Matrix;
use libeditdist::operations::Operation;
use libeditdist::presets::Preset;
use libeditdist::render::{DisplayData, Renderer, Renderers};
use libeditdist::sequence::{LabeledSequencePair, Runes, Words};
use log::{LevelFilter, debug, error, info, warn};
use serde_json as json;
use std::{fs, io, io::Write};
use strum::IntoEnumIterator;

#[cfg(feature = "jemallocator")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemallocator")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Return an instance of [Config] from a config file path (or the inferred default path)
///
/// If a config path isn't provided or there is some other failure, fall back to the default
/// config. This will error out if a config is found but is found to be an invalid config.
fn derive_config(args: &Args) -> Result<Config> {
    if args.no_config {
        info!("`no_config` specified, falling back to default config");
        return Ok(Config::default());
    }
    match Config::try_from_file(args.config.as_ref()) {
        Ok(config) => Ok(config),
        Err(e) => match e {
            // Not finding a config at all isn't a hard error, it makes sense for us to use the
            // default config.
            ReadError::ReadFileFailure(_) | ReadError::NoDefault => {
                warn!("{} - falling back to default config", e);
                Ok(Config::default())
            }
            // A config that exists but doesn't parse is a mistake the user needs to hear about
            ReadError::DeserializationFailure(e) => {
                error!("Failed to deserialize config file: {}", e);
                Err(anyhow::anyhow!(e))
            }
        },
    }
}

/// Get the text to compare for one of the positional arguments.
///
/// With `--files` the argument is a path and this returns the contents of the file.
fn read_input(arg: Option<&String>, files: bool) -> Result<String> {
    let arg = arg.context("Both SOURCE and TARGET are required")?;

    if files {
        debug!("Reading input file {}", arg);
        return fs::read_to_string(arg).with_context(|| format!("Failed to read {arg}"));
    }
    Ok(arg.clone())
}

/// Compute the distance between the inputs and render the result
fn run_distance(args: Args, config: Config) -> Result<()> {
    let source = read_input(args.source.as_ref(), args.files)?;
    let target = read_input(args.target.as_ref(), args.files)?;

    // Check whether we can get the renderer up front. This is more ergonomic than computing the
    // matrix and then informing the user their renderer choice is incorrect.
    let tokenizer = args.tokenizer.unwrap_or(config.tokenizer);
    let ops = match args.preset {
        Some(preset) => preset.operations(),
        None => config.operations(),
    }
    .to_vec();
    let renderer = config.formatting.get_renderer(args.renderer)?;
    info!("Comparing inputs as {} with {} operations", tokenizer, ops.len());

    match tokenizer {
        Tokenizer::Chars => render_distance(&Runes::new(&source, &target), &ops, &renderer),
        Tokenizer::Words => render_distance(&Words::from_text(&source, &target), &ops, &renderer),
    }
}

fn render_distance<P: LabeledSequencePair>(
    pair: &P,
    ops: &[Operation],
    renderer: &Renderers,
) -> Result<()> {
    let matrix = Matrix::build(pair, ops)?;
    let script = matrix.edit_script(pair, ops)?;
    let params = DisplayData {
        pair,
        matrix: &matrix,
        script: &script,
    };
    // Use a buffered terminal instead of a normal unbuffered terminal so we can amortize the cost
    // of printing. Large matrices print a lot of small cells.
    let mut buf_writer = Term::buffered_stdout();
    let term_info = buf_writer.clone();
    renderer.render(&mut buf_writer, &params, Some(&term_info))?;
    buf_writer.flush()?;
    Ok(())
}

/// Serialize the default options struct to a json file and print that to stdout
fn dump_default_config() -> Result<()> {
    let config = Config::default();
    println!("{}", json::to_string_pretty(&config)?);
    Ok(())
}

/// Print the operation presets and what they contain
fn list_presets() {
    println!("Available operation presets:");

    for preset in Preset::iter() {
        let names: Vec<String> = preset.operations().iter().map(ToString::to_string).collect();
        println!(
            "- {preset}: {} ({})",
            preset.description(),
            names.join(", ")
        );
    }
}

/// Print shell completion scripts to `stdout`.
///
/// This is a basic wrapper for the subcommand.
fn print_shell_completion(shell: clap_complete::Shell) {
    let mut app = cli::Args::command();
    clap_complete::generate(shell, &mut app, "editdist", &mut io::stdout());
}

fn main() -> Result<()> {
    // Set up a panic handler that will yield more human-readable errors.
    #[cfg(panic = "unwind")]
    setup_panic!();

    use cli::Command;

    let command = Args::command();
    let matches = command.get_matches();
    let args = Args::from_arg_matches(&matches)?;

    let log_level = if args.debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Off
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log_level)
        .init();

    // We parse the config as early as possible so users can get quick feedback if anything is off
    // with their config.
    let config = derive_config(&args)?;

    // Users can supply a command that will *not* compute a distance, which we handle here
    if let Some(cmd) = args.cmd {
        match cmd {
            Command::List => list_presets(),
            Command::DumpDefaultConfig => dump_default_config()?,
            Command::GenCompletion { shell } => print_shell_completion(shell),
        }
    } else {
        console_utils::set_term_colors(args.color_output);
        run_distance(args, config)?;
    }
    Ok(())
}
