use super::cli_main::WindowArgs;
use crate::Presentation::rate_plots::{RatePlotConfig, ReportFiles, TitlePage, render_report};
use crate::Rates::analysis::RateAnalysis;
use crate::Rates::errors::RateResult;
use crate::Rates::pruner::PruneOptions;
use crate::settings::AnalysisOptions;
use log::info;

pub const DEFAULT_PLOT_PREFIX: &str = "temp_rates_plot";

/// Reads, windows, restricts, ranks and lumps both rate files and renders the SVG pages.
/// Requested species that do not appear in a file are skipped.
pub fn run_plot(args: &WindowArgs, options: &AnalysisOptions) -> RateResult<ReportFiles> {
    let prune_options = PruneOptions {
        drop_reversible: options.drop_reversible,
        ..PruneOptions::default()
    };
    let analysis = RateAnalysis::load(&args.output_dir, &args.species, &prune_options, false)?
        .windowed(args.start, args.end)?
        .restricted(&options.production_restriction(), &options.loss_restriction())?;
    let tables = analysis.plot_tables(
        args.top_n,
        &options.lump_production_reactions,
        &options.lump_loss_reactions,
    )?;

    let mut species: Vec<String> = tables.loss.rates.species.keys().cloned().collect();
    for name in tables.production.rates.species.keys() {
        if !species.contains(name) {
            species.push(name.clone());
        }
    }
    let title = TitlePage::new(species, options)?;
    let prefix = options.report_path.as_deref().unwrap_or(DEFAULT_PLOT_PREFIX);
    let files = render_report(
        &tables,
        &analysis.production.reactions,
        &analysis.loss.reactions,
        &title,
        prefix,
        &RatePlotConfig::default(),
    )?;
    info!("plot finished");
    Ok(files)
}
