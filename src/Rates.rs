/// error taxonomy of the pipeline and the `Direction` of a rate table
pub mod errors;
/// typed `reactants=products` equation text with set views used for pair detection
pub mod equation;
/// eng
/// Reader (and writer) of the production/loss rate files of the box model. The data is stored as
/// species -> reaction number -> series aligned with one sorted, duplicate-free time axis, plus a reaction
/// dictionary reaction number -> equation with a reverse index equation text -> reaction numbers.
pub mod rate_reader;
/// reader of the species concentration file, used to convert summed rates to s-1
pub mod concentrations;
/// eng
/// Restricts a rate table to ALL species, a list of named species or a species family. The NOx family
/// is the weighted sum of NO, NO2, NO3 and N2O5 (N2O5 counts twice); the weight of a reaction is taken
/// from the product side for production and from the reactant side for loss.
pub mod species_filter;
/// eng
/// Removes zero-rate reactions, reactions with a species on both sides (net zero), and optionally both
/// members of every reversible pair inside one table. Removal keys are collected first, then a new table
/// is built without them.
pub mod pruner;
/// nets production and loss reactions that are exact reverses into one signed series
pub mod reversible;
/// START/END/time bounds resolved by nearest match into an inclusive index window
pub mod time_window;
/// top-N reactions per species by median or mean with the remainder summed into `Other`
pub mod ranking;
/// user defined categories of reactions summed into one series per category
pub mod lumping;
/// percent of the species total at each timestep
pub mod proportions;
/// eng
/// The three analyses built from the stages above: stacked plots of the top reactions, averaged top
/// reactions with reversible pairs netted, and the summed net rate of one species.
pub mod analysis;
mod rates_tests;
