use super::cli_average::run_average;
use super::cli_plot::run_plot;
use super::cli_summed::run_summed;
use crate::Rates::errors::{RateError, RateResult};
use crate::Rates::species_filter::SpeciesSelection;
use crate::Rates::time_window::TimeBound;
use crate::Utils::logger::init_from_options;
use crate::settings::AnalysisOptions;

/// positional arguments shared by the plot and average modes
#[derive(Debug, Clone, PartialEq)]
pub struct WindowArgs {
    pub output_dir: String,
    pub species: SpeciesSelection,
    pub top_n: usize,
    pub start: TimeBound,
    pub end: TimeBound,
}

fn usage(message: impl Into<String>) -> RateError {
    RateError::Usage(message.into())
}

/// keys every mode reads
const COMMON_KEYS: [&str; 3] = ["log_level", "save_logs", "options_file"];

/// Rejects `key=value` tokens whose key `mode` never reads. Unknown keys are left to
/// `AnalysisOptions::from_tokens`.
pub fn reject_unused_options(mode: &str, tokens: &[String], extra_keys: &[&str]) -> RateResult<()> {
    for token in tokens {
        let Some((key, _)) = token.split_once('=') else {
            continue;
        };
        if !COMMON_KEYS.contains(&key) && !extra_keys.contains(&key) {
            return Err(usage(format!("option '{}' has no effect in {} mode", key, mode)));
        }
    }
    Ok(())
}

pub fn parse_top_n(arg: &str) -> RateResult<usize> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(usage(format!(
            "number of reactions must be a positive integer, got '{}'",
            arg
        ))),
    }
}

/// `<output_dir> <species> <top_n> <start> <end>` followed by `key=value` options
pub fn parse_window_args(mode: &str, args: &[String]) -> RateResult<(WindowArgs, AnalysisOptions)> {
    if args.len() < 5 {
        return Err(usage(format!(
            "{} needs 5 arguments: output_dir species top_n start end (got {})",
            mode,
            args.len()
        )));
    }
    let window = WindowArgs {
        output_dir: args[0].clone(),
        species: args[1].parse()?,
        top_n: parse_top_n(&args[2])?,
        start: args[3].parse()?,
        end: args[4].parse()?,
    };
    let options = AnalysisOptions::from_tokens(&args[5..])?;
    if mode == "average" {
        reject_unused_options(mode, &args[5..], &[])?;
    }
    Ok((window, options))
}

/// `<output_dir> <species>` followed by `key=value` options; one species only
pub fn parse_summed_args(args: &[String]) -> RateResult<(String, String, AnalysisOptions)> {
    if args.len() < 2 {
        return Err(usage(format!(
            "summed needs 2 arguments: output_dir species (got {})",
            args.len()
        )));
    }
    let species = match args[1].parse::<SpeciesSelection>()? {
        SpeciesSelection::Named(names) if names.len() == 1 => names[0].clone(),
        _ => {
            return Err(usage(format!(
                "summed takes a single species, got '{}'",
                args[1]
            )));
        }
    };
    let options = AnalysisOptions::from_tokens(&args[2..])?;
    reject_unused_options("summed", &args[2..], &["report_path"])?;
    Ok((args[0].clone(), species, options))
}

/// Entry point of the binary: `args` are the command line arguments without the program name.
pub fn run(args: &[String]) -> RateResult<()> {
    let Some((mode, rest)) = args.split_first() else {
        return Err(usage("no mode given, expected plot, average or summed"));
    };
    match mode.as_str() {
        "plot" => {
            let (window, options) = parse_window_args(mode, rest)?;
            init_from_options(&options)?;
            run_plot(&window, &options).map(|_| ())
        }
        "average" => {
            let (window, options) = parse_window_args(mode, rest)?;
            init_from_options(&options)?;
            run_average(&window).map(|_| ())
        }
        "summed" => {
            let (output_dir, species, options) = parse_summed_args(rest)?;
            init_from_options(&options)?;
            run_summed(&output_dir, &species, &options).map(|_| ())
        }
        other => Err(usage(format!(
            "unknown mode '{}', expected plot, average or summed",
            other
        ))),
    }
}
