//! Chillbot - drink presence detection from image-classifier scores.
//!
//! The crate turns per-frame confidence vectors from an external image
//! classifier into a stable drinks result: the scores are smoothed across
//! frames, the top labels are picked, and a fixed rule chain decides which
//! drink is present.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{ClassifyArgs, Cli, Command, ConfigAction};
use config::{Config, load_config, resolve_config_path, save_config, validate_config};
use inference::{DrinkClassifier, RecordedScores, Vocabulary};
use output::{ConsoleWriter, Drink, JsonStore, ResultSink, availability_answer};
use pipeline::process_file;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for chillbot CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.classify.verbose, cli.classify.quiet);

    let config = load_config(cli.classify.config.as_deref())?;
    validate_config(&config)?;

    if let Some(command) = cli.command {
        return handle_command(command, &cli.classify, &config);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    classify_files(&cli.inputs, &cli.classify, &config)
}

/// Replay frames files through one classifier.
///
/// Filter state carries over from one file to the next, as if the files were
/// consecutive stretches of the same camera feed.
fn classify_files(inputs: &[PathBuf], args: &ClassifyArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let labels_path = args
        .labels
        .clone()
        .or_else(|| config.labels.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no labels file specified (use --labels or set labels in config)".to_string(),
        })?;

    let vocabulary = Vocabulary::from_file(&labels_path)?;
    info!(
        "Loaded {} labels from {}",
        vocabulary.len(),
        labels_path.display()
    );

    let mut settings = config.classifier_settings();
    if let Some(stages) = args.stages {
        settings.filter_stages = stages;
    }
    if let Some(factor) = args.factor {
        settings.filter_factor = factor;
    }
    if let Some(top_k) = args.top_k {
        settings.top_k = top_k;
    }

    let format = args.format.unwrap_or(config.output.format);
    let mut store = resolve_store(args, config);
    if let Some(ref store) = store {
        info!(
            "Storing results under '{}' in {}",
            store.key(),
            store.path().display()
        );
    }

    let mut classifier = DrinkClassifier::new(vocabulary, &settings, RecordedScores)?;
    let mut console = ConsoleWriter::new(std::io::stdout().lock(), format);

    let mut next_frame = 1;
    let mut total_frames = 0;
    let mut total_skipped = 0;
    let mut errors = 0;
    let mut last = None;

    for input in inputs {
        let mut sinks: Vec<&mut dyn ResultSink> = Vec::with_capacity(2);
        sinks.push(&mut console);
        if let Some(ref mut store) = store {
            sinks.push(store);
        }

        match process_file(input, &mut classifier, &mut sinks, next_frame, args.fail_fast) {
            Ok(result) => {
                next_frame += result.frames + result.skipped;
                total_frames += result.frames;
                total_skipped += result.skipped;
                if result.last.is_some() {
                    last = result.last;
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", input.display(), e);
                errors += 1;
                if args.fail_fast {
                    classifier.close();
                    return Err(e);
                }
            }
        }
    }

    console.finalize()?;
    classifier.close();

    info!(
        "Complete: {} frames, {} skipped, {} file errors in {:.2}s",
        total_frames,
        total_skipped,
        errors,
        total_start.elapsed().as_secs_f64()
    );

    if let Some(decision) = last {
        info!(
            "Final result ({}): {}",
            decision.rule,
            decision.result.to_string().replace('\n', ", ")
        );
        if decision.is_fallback() {
            warn!("Final result is the fallback answer, not a confident detection");
        }
    }

    if errors > 0 {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

/// Store from CLI arguments or config, if either names a path.
fn resolve_store(args: &ClassifyArgs, config: &Config) -> Option<JsonStore> {
    let path = args.store.clone().or_else(|| config.store.path.clone())?;
    let key = args
        .store_key
        .clone()
        .unwrap_or_else(|| config.store.key.clone());
    Some(JsonStore::new(path, key))
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr; stdout carries the per-frame results.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command, args: &ClassifyArgs, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, args),
        Command::Query { drink } => {
            let drink: Drink = drink.parse()?;
            let store = resolve_store(args, config).ok_or_else(|| Error::ConfigValidation {
                message: "no result store specified (use --store or set store.path in config)"
                    .to_string(),
            })?;
            let result = store.load()?.ok_or_else(|| Error::NoStoredResult {
                key: store.key().to_string(),
            })?;
            println!("{}", availability_answer(drink, &result));
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, args: &ClassifyArgs) -> Result<()> {
    let path = resolve_config_path(args.config.as_deref())?;

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext step: set `labels` to your model's labels file.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(args.config.as_deref())?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
