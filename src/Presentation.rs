/// prettytable report of the averaging mode
pub mod averages_report;
/// eng
/// SVG pages of the plot mode: a title page and stacked area plots of loss, production and their
/// percentages, one panel per species, drawn with plotters
pub mod rate_plots;
/// text table of the summed-rate mode
pub mod summed_rate_export;
