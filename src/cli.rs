/// mode dispatch and positional argument parsing
pub mod cli_main;
/// stacked plots of the top reactions
pub mod cli_plot;
/// averaged top reactions printed as tables
pub mod cli_average;
/// summed net rate of one species
pub mod cli_summed;
pub mod usage_help;
