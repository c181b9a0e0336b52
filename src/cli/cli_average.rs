use super::cli_main::WindowArgs;
use crate::Presentation::averages_report::print_averages;
use crate::Rates::analysis::{AverageSummary, RateAnalysis};
use crate::Rates::errors::RateResult;
use crate::Rates::pruner::PruneOptions;

/// Averages over the window with reversible pairs netted and prints the tables.
/// Every requested species must be present in both files.
pub fn run_average(args: &WindowArgs) -> RateResult<AverageSummary> {
    let analysis = RateAnalysis::load(&args.output_dir, &args.species, &PruneOptions::default(), true)?
        .windowed(args.start, args.end)?;
    let summary = analysis.averages(args.top_n)?;
    print_averages(
        &summary,
        &analysis.production.reactions,
        &analysis.loss.reactions,
    );
    Ok(summary)
}
