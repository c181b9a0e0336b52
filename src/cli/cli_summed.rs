use crate::Presentation::summed_rate_export::{DEFAULT_SUMMED_RATE_FILE, write_summed_rate};
use crate::Rates::analysis::{CONCENTRATION_FILE, RateAnalysis, output_file};
use crate::Rates::concentrations::read_concentrations;
use crate::Rates::errors::RateResult;
use crate::Rates::pruner::PruneOptions;
use crate::Rates::species_filter::SpeciesSelection;
use crate::settings::AnalysisOptions;

/// Writes the net first-order rate of `species` and returns the file it went to.
pub fn run_summed(output_dir: &str, species: &str, options: &AnalysisOptions) -> RateResult<String> {
    let selection = SpeciesSelection::Named(vec![species.to_string()]);
    let analysis = RateAnalysis::load(output_dir, &selection, &PruneOptions::default(), false)?;
    let wanted = vec![species.to_string()];
    let concentrations = read_concentrations(
        &output_file(output_dir, CONCENTRATION_FILE),
        Some(wanted.as_slice()),
    )?;
    let net = analysis.summed_net_rate(species, &concentrations)?;
    let file_name = options
        .report_path
        .clone()
        .unwrap_or_else(|| DEFAULT_SUMMED_RATE_FILE.to_string());
    write_summed_rate(&file_name, species, &net)?;
    Ok(file_name)
}
