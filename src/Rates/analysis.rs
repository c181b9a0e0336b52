//! # Rate Analysis
//!
//! Ties the stages together for one model output directory. `RateAnalysis` holds the
//! production and loss files after reading, species selection and pruning; the
//! methods then window, restrict and reshape the tables for one of the three
//! reports:
//! - plots: top-N by median with `Other`, lumps, percentages;
//! - averages: reversible pairs netted, top-N by mean;
//! - summed rate: net first-order rate of one species.
//!
//! Every stage returns new tables; nothing is mutated while it is traversed.
use super::concentrations::ConcentrationTable;
use super::errors::{Direction, RateError, RateResult};
use super::lumping::{LumpSpec, apply_lumps};
use super::proportions::proportions;
use super::pruner::{PruneOptions, prune, without_keys};
use super::ranking::{RankedMean, ShapedTable, Statistic, ranked_means, top_n_with_other};
use super::rate_reader::{RateFile, RateTable, ReactionDictionary, read_rate_file};
use super::reversible::reconcile;
use super::species_filter::{SpeciesSelection, select};
use super::time_window::{TimeBound, TimeWindow};
use indexmap::IndexMap;
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

pub const PRODUCTION_FILE: &str = "productionRates.output";
pub const LOSS_FILE: &str = "lossRates.output";
pub const CONCENTRATION_FILE: &str = "speciesConcentrations.output";

/// path of one of the model output files inside `output_dir`
pub fn output_file(output_dir: &str, file: &str) -> String {
    Path::new(output_dir).join(file).to_string_lossy().into_owned()
}

/// reaction lists that narrow one direction before ranking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionRestriction {
    /// when not empty, the only reactions kept
    pub exclusive: Vec<String>,
    pub remove: Vec<String>,
}

impl ReactionRestriction {
    pub fn is_empty(&self) -> bool {
        self.exclusive.is_empty() && self.remove.is_empty()
    }
}

/// Applies an exclusive list first and a remove list second. Unknown equation
/// texts fail with `Lookup`.
pub fn restrict(
    table: &RateTable,
    reactions: &ReactionDictionary,
    restriction: &ReactionRestriction,
) -> RateResult<RateTable> {
    if restriction.is_empty() {
        return Ok(table.clone());
    }
    let exclusive: HashSet<u32> = reactions
        .resolve_all(&restriction.exclusive)?
        .into_iter()
        .collect();
    let removed: HashSet<u32> = reactions
        .resolve_all(&restriction.remove)?
        .into_iter()
        .collect();
    let mut keys = HashSet::new();
    for (species, rates) in &table.species {
        for number in rates.keys() {
            let outside = !exclusive.is_empty() && !exclusive.contains(number);
            if outside || removed.contains(number) {
                keys.insert((species.clone(), *number));
            }
        }
    }
    info!(
        "Restricted the {} table: {} entries removed",
        table.direction,
        keys.len()
    );
    Ok(without_keys(table, &keys))
}

/// what the plot report draws for one direction
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub rates: ShapedTable,
    pub percent: ShapedTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotTables {
    pub loss: PlotSeries,
    pub production: PlotSeries,
}

/// top reactions by mean rate for every direction
#[derive(Debug, Clone, PartialEq)]
pub struct AverageSummary {
    pub top_n: usize,
    pub production: IndexMap<String, Vec<RankedMean>>,
    pub loss: IndexMap<String, Vec<RankedMean>>,
    pub reversible: IndexMap<String, Vec<RankedMean>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateAnalysis {
    pub production: RateFile,
    pub loss: RateFile,
}

impl RateAnalysis {
    /// Reads both rate files from `output_dir`, keeps the selected species and prunes.
    pub fn load(
        output_dir: &str,
        selection: &SpeciesSelection,
        prune_options: &PruneOptions,
        error_for_missing: bool,
    ) -> RateResult<Self> {
        let production = read_rate_file(
            &output_file(output_dir, PRODUCTION_FILE),
            Direction::Production,
        )?;
        let loss = read_rate_file(&output_file(output_dir, LOSS_FILE), Direction::Loss)?;
        Self::from_files(production, loss, selection, prune_options, error_for_missing)
    }

    pub fn from_files(
        production: RateFile,
        loss: RateFile,
        selection: &SpeciesSelection,
        prune_options: &PruneOptions,
        error_for_missing: bool,
    ) -> RateResult<Self> {
        let prepare = |file: RateFile| -> RateResult<RateFile> {
            let selected = select(&file.table, &file.reactions, selection, error_for_missing)?;
            let table = prune(&selected, &file.reactions, prune_options)?;
            Ok(RateFile {
                reactions: file.reactions,
                table,
            })
        };
        Ok(Self {
            production: prepare(production)?,
            loss: prepare(loss)?,
        })
    }

    /// Restricts both tables to `[start, end]`, resolved on each file's own time axis.
    pub fn windowed(&self, start: TimeBound, end: TimeBound) -> RateResult<Self> {
        let window = |file: &RateFile| -> RateResult<RateFile> {
            let range = TimeWindow::resolve(&file.table.times, start, end)?;
            Ok(RateFile {
                reactions: file.reactions.clone(),
                table: file.table.windowed(&range)?,
            })
        };
        Ok(Self {
            production: window(&self.production)?,
            loss: window(&self.loss)?,
        })
    }

    pub fn restricted(
        &self,
        production: &ReactionRestriction,
        loss: &ReactionRestriction,
    ) -> RateResult<Self> {
        Ok(Self {
            production: RateFile {
                reactions: self.production.reactions.clone(),
                table: restrict(&self.production.table, &self.production.reactions, production)?,
            },
            loss: RateFile {
                reactions: self.loss.reactions.clone(),
                table: restrict(&self.loss.table, &self.loss.reactions, loss)?,
            },
        })
    }

    /// Ranked (then lumped) series and their percentages for both directions.
    pub fn plot_tables(
        &self,
        top_n: usize,
        lump_production: &LumpSpec,
        lump_loss: &LumpSpec,
    ) -> RateResult<PlotTables> {
        let shape = |file: &RateFile, lumps: &LumpSpec| -> RateResult<PlotSeries> {
            let ranked = top_n_with_other(&file.table, top_n, Statistic::Median);
            let rates = apply_lumps(ranked, &file.table, &file.reactions, lumps)?;
            let percent = proportions(&rates);
            Ok(PlotSeries { rates, percent })
        };
        Ok(PlotTables {
            loss: shape(&self.loss, lump_loss)?,
            production: shape(&self.production, lump_production)?,
        })
    }

    /// Nets reversible pairs and ranks every direction by mean rate.
    pub fn averages(&self, top_n: usize) -> RateResult<AverageSummary> {
        let reconciled = reconcile(
            &self.production.table,
            &self.production.reactions,
            &self.loss.table,
            &self.loss.reactions,
        )?;
        Ok(AverageSummary {
            top_n,
            production: ranked_means(&reconciled.production, top_n),
            loss: ranked_means(&reconciled.loss, top_n),
            reversible: ranked_means(&reconciled.reversible, top_n),
        })
    }

    /// `(time, net rate in s-1)` for one species:
    /// `sum(production) / conc - sum(loss) / conc` at every timestep.
    pub fn summed_net_rate(
        &self,
        species: &str,
        concentrations: &ConcentrationTable,
    ) -> RateResult<Vec<(f64, f64)>> {
        let production = &self.production.table;
        let loss = &self.loss.table;
        if production.times != loss.times {
            return Err(RateError::UnalignedSeries(
                "production and loss files have different timesteps".to_string(),
            ));
        }
        let missing = |table: &RateTable| RateError::MissingSpecies {
            species: species.to_string(),
            table: table.direction.to_string(),
        };
        if !production.species.contains_key(species) && !loss.species.contains_key(species) {
            return Err(missing(production));
        }
        let total_at = |table: &RateTable, i: usize| -> f64 {
            table
                .species
                .get(species)
                .map(|rates| rates.values().map(|series| series[i]).sum())
                .unwrap_or(0.0)
        };

        let mut net = Vec::with_capacity(production.times.len());
        for (i, time) in production.times.iter().enumerate() {
            let conc = concentrations.value_at(species, *time)?;
            if conc == 0.0 {
                warn!("{} concentration is zero at t = {}, net rate set to 0", species, time);
                net.push((*time, 0.0));
                continue;
            }
            net.push((
                *time,
                total_at(production, i) / conc - total_at(loss, i) / conc,
            ));
        }
        info!("Computed summed net rate of {} at {} timesteps", species, net.len());
        Ok(net)
    }
}
