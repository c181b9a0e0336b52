//! # Reversible-Pair Reconciler
//!
//! Production and loss files number their reactions independently. A production
//! reaction `p` and a loss reaction `l` form a reversible pair when
//! `reactants(p) == products(l)` and `products(p) == reactants(l)` (set comparison).
//!
//! For every species that has `p` among its production entries and `l` among its loss
//! entries, the net series `production(p) - loss(l)` is stored under `p` in a third,
//! reversible table (positive = net production, negative = net loss), and both
//! one-directional entries are removed. Species that do not take part in a direction
//! are skipped. The two tables must share the same time axis; this is checked before
//! anything is subtracted.
use super::errors::{Direction, RateError, RateResult};
use super::pruner::{SideIndex, without_keys};
use super::rate_reader::{RateTable, ReactionDictionary, Series};
use log::{debug, info};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReversiblePair {
    pub production: u32,
    pub loss: u32,
}

/// production table, loss table and net reversible table after netting
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub production: RateTable,
    pub loss: RateTable,
    pub reversible: RateTable,
    pub pairs: Vec<ReversiblePair>,
}

/// Detects all (production, loss) reaction pairs that are exact reverses of each other.
pub fn find_reversible_pairs(
    production_reactions: &ReactionDictionary,
    loss_reactions: &ReactionDictionary,
) -> Vec<ReversiblePair> {
    let loss_index = SideIndex::new(loss_reactions);
    let mut pairs = Vec::new();
    for (p, equation) in production_reactions.iter() {
        for l in loss_index.reverses_of(equation) {
            pairs.push(ReversiblePair {
                production: p,
                loss: *l,
            });
        }
    }
    pairs
}

/// elementwise `production - loss`; both series must have the same length
pub fn net_series(production: &[f64], loss: &[f64]) -> RateResult<Series> {
    if production.len() != loss.len() {
        return Err(RateError::UnalignedSeries(format!(
            "production series has {} values, loss series has {}",
            production.len(),
            loss.len()
        )));
    }
    Ok(production.iter().zip(loss).map(|(p, l)| p - l).collect())
}

fn check_time_axes(production: &RateTable, loss: &RateTable) -> RateResult<()> {
    if production.times != loss.times {
        return Err(RateError::UnalignedSeries(format!(
            "production file has {} timesteps, loss file has {} and they differ",
            production.times.len(),
            loss.times.len()
        )));
    }
    production.check_alignment()?;
    loss.check_alignment()
}

/// Nets every reversible pair per species and removes the consumed entries.
pub fn reconcile(
    production: &RateTable,
    production_reactions: &ReactionDictionary,
    loss: &RateTable,
    loss_reactions: &ReactionDictionary,
) -> RateResult<Reconciled> {
    check_time_axes(production, loss)?;
    let pairs = find_reversible_pairs(production_reactions, loss_reactions);
    debug!("reversible pairs: {:?}", pairs);

    let mut reversible = RateTable::new(Direction::Reversible, production.times.clone());
    let mut remove_production: HashSet<(String, u32)> = HashSet::new();
    let mut remove_loss: HashSet<(String, u32)> = HashSet::new();

    let species: Vec<&String> = production
        .species
        .keys()
        .chain(loss.species.keys().filter(|s| !production.species.contains_key(*s)))
        .collect();

    for pair in &pairs {
        for name in &species {
            let (Some(prod), Some(lost)) = (
                production.get(name, pair.production),
                loss.get(name, pair.loss),
            ) else {
                continue;
            };
            let net = net_series(prod, lost)?;
            reversible
                .species
                .entry((*name).clone())
                .or_default()
                .insert(pair.production, net);
            remove_production.insert(((*name).clone(), pair.production));
            remove_loss.insert(((*name).clone(), pair.loss));
        }
    }

    let reconciled = Reconciled {
        production: without_keys(production, &remove_production),
        loss: without_keys(loss, &remove_loss),
        reversible: reversible.without_empty_species(),
        pairs,
    };
    info!(
        "Netted {} reversible pairs over {} species",
        reconciled.pairs.len(),
        reconciled.reversible.species.len()
    );
    Ok(reconciled)
}
