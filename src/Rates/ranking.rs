//! # Top-N Ranker
//!
//! Orders the reactions of each species by a summary statistic of their series over
//! the active window (median for plots, mean for the averaged summary) and keeps the
//! `top_n` largest. Reversible tables are ordered by absolute value since the sign
//! only tells the direction. Everything below the cut is summed elementwise into a
//! synthetic `Other` series appended last, so the kept series plus `Other` always
//! add up to the full set.
use super::errors::Direction;
use super::rate_reader::{RateTable, ReactionDictionary, Series, SpeciesRates};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statistic {
    Median,
    Mean,
}

impl Statistic {
    /// summary value of a series; 0 for an empty one
    pub fn of(&self, series: &[f64]) -> f64 {
        if series.is_empty() {
            return 0.0;
        }
        match self {
            Statistic::Mean => series.iter().sum::<f64>() / series.len() as f64,
            Statistic::Median => {
                let mut sorted = series.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        }
    }
}

/// key of a series after ranking or lumping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesKey {
    Reaction(u32),
    Other,
    Category(String),
}

impl SeriesKey {
    /// legend label: equation text, `Other` or the category name
    pub fn label(&self, reactions: &ReactionDictionary) -> String {
        match self {
            SeriesKey::Reaction(number) => reactions
                .text(*number)
                .map(str::to_string)
                .unwrap_or_else(|| format!("reaction {}", number)),
            SeriesKey::Other => "Other".to_string(),
            SeriesKey::Category(name) => name.clone(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Reaction(number) => write!(f, "{}", number),
            SeriesKey::Other => write!(f, "Other"),
            SeriesKey::Category(name) => write!(f, "{}", name),
        }
    }
}

/// species -> ordered series, ready for proportions and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedTable {
    pub direction: Direction,
    pub times: Vec<f64>,
    pub species: IndexMap<String, IndexMap<SeriesKey, Series>>,
}

impl ShapedTable {
    pub fn new(direction: Direction, times: Vec<f64>) -> Self {
        Self {
            direction,
            times,
            species: IndexMap::new(),
        }
    }

    pub fn get(&self, species: &str, key: &SeriesKey) -> Option<&Series> {
        self.species.get(species).and_then(|series| series.get(key))
    }

    pub fn species_names(&self) -> Vec<&str> {
        self.species.keys().map(String::as_str).collect()
    }
}

/// reaction numbers of one species with their score, best first
pub fn rank_reactions(
    rates: &SpeciesRates,
    direction: Direction,
    statistic: Statistic,
) -> Vec<(u32, f64)> {
    let mut scored: Vec<(u32, f64)> = rates
        .iter()
        .map(|(number, series)| (*number, statistic.of(series)))
        .collect();
    let magnitude = |score: f64| match direction {
        Direction::Reversible => score.abs(),
        _ => score,
    };
    // stable: equal scores keep file order
    scored.sort_by(|a, b| magnitude(b.1).total_cmp(&magnitude(a.1)));
    scored
}

pub fn sum_series<'a, I>(len: usize, series: I) -> Series
where
    I: IntoIterator<Item = &'a Series>,
{
    let mut total = vec![0.0; len];
    for s in series {
        for (acc, x) in total.iter_mut().zip(s) {
            *acc += x;
        }
    }
    total
}

/// Keeps the `top_n` best reactions of every species and folds the rest into `Other`.
/// Species without reactions are left out.
pub fn top_n_with_other(table: &RateTable, top_n: usize, statistic: Statistic) -> ShapedTable {
    let mut shaped = ShapedTable::new(table.direction, table.times.clone());
    for (species, rates) in &table.species {
        if rates.is_empty() {
            continue;
        }
        let ranked = rank_reactions(rates, table.direction, statistic);
        let (top, rest) = ranked.split_at(top_n.min(ranked.len()));
        debug!(
            "{} {}: top {:?}, {} reactions in Other",
            table.direction,
            species,
            top.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            rest.len()
        );
        let mut series: IndexMap<SeriesKey, Series> = top
            .iter()
            .map(|(number, _)| (SeriesKey::Reaction(*number), rates[number].clone()))
            .collect();
        let other = sum_series(
            table.times.len(),
            rest.iter().map(|(number, _)| &rates[number]),
        );
        series.insert(SeriesKey::Other, other);
        shaped.species.insert(species.clone(), series);
    }
    info!(
        "Ranked {} {} species, top {} by {:?}",
        shaped.species.len(),
        table.direction,
        top_n,
        statistic
    );
    shaped
}

/// one row of the averaged summary
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMean {
    pub reaction: u32,
    pub mean: f64,
    /// percent of the species' total mean rate; not given for reversible rates
    pub share: Option<f64>,
}

/// Top `top_n` reactions of every species by mean rate over the table's time axis.
pub fn ranked_means(table: &RateTable, top_n: usize) -> IndexMap<String, Vec<RankedMean>> {
    let mut summary = IndexMap::new();
    for (species, rates) in &table.species {
        if rates.is_empty() {
            continue;
        }
        let ranked = rank_reactions(rates, table.direction, Statistic::Mean);
        let total: f64 = ranked.iter().map(|(_, mean)| mean).sum();
        let rows = ranked
            .iter()
            .take(top_n)
            .map(|(reaction, mean)| RankedMean {
                reaction: *reaction,
                mean: *mean,
                share: match table.direction {
                    Direction::Reversible => None,
                    _ if total != 0.0 => Some(mean / total * 100.0),
                    _ => Some(0.0),
                },
            })
            .collect();
        summary.insert(species.clone(), rows);
    }
    summary
}
