//! # Reaction Pruner
//!
//! Removes (species, reaction) entries from a rate table:
//! - `drop_zero`: the series is exactly zero at every timestep;
//! - `drop_net_zero`: some product species of the equation also appears with the same
//!   count among the reactants; such a reaction is dropped for every species;
//! - `drop_reversible`: the same table holds another reaction that is its exact
//!   reverse; both members of the pair are dropped.
//!
//! Pruning is two steps: [`removal_set`] only collects keys, [`prune`] then builds a
//! new table without them. A key may be collected by several rules; removing it once
//! is enough. Species left without reactions are dropped from the result.
use super::equation::Equation;
use super::errors::{RateError, RateResult};
use super::rate_reader::{RateTable, ReactionDictionary};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneOptions {
    pub drop_zero: bool,
    pub drop_net_zero: bool,
    pub drop_reversible: bool,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            drop_zero: true,
            drop_net_zero: true,
            drop_reversible: false,
        }
    }
}

type SideKey = (Vec<String>, Vec<String>);

fn side_key(reactants: BTreeSet<&str>, products: BTreeSet<&str>) -> SideKey {
    (
        reactants.into_iter().map(str::to_string).collect(),
        products.into_iter().map(str::to_string).collect(),
    )
}

/// Index of equations by (reactant set, product set), so that reverse lookups are a
/// single hash probe instead of a scan over the dictionary.
pub(crate) struct SideIndex {
    by_sides: HashMap<SideKey, Vec<u32>>,
}

impl SideIndex {
    pub(crate) fn new(reactions: &ReactionDictionary) -> Self {
        let mut by_sides: HashMap<SideKey, Vec<u32>> = HashMap::new();
        for (number, equation) in reactions.iter() {
            by_sides
                .entry(side_key(equation.reactant_set(), equation.product_set()))
                .or_default()
                .push(number);
        }
        Self { by_sides }
    }

    /// numbers of all reactions that run `equation` backwards
    pub(crate) fn reverses_of(&self, equation: &Equation) -> &[u32] {
        let key = side_key(equation.product_set(), equation.reactant_set());
        self.by_sides
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn equation_of<'a>(reactions: &'a ReactionDictionary, number: u32) -> RateResult<&'a Equation> {
    reactions
        .get(number)
        .ok_or_else(|| RateError::Lookup(format!("reaction number {}", number)))
}

/// Collects the (species, reaction) keys the enabled rules want removed.
pub fn removal_set(
    table: &RateTable,
    reactions: &ReactionDictionary,
    options: &PruneOptions,
) -> RateResult<HashSet<(String, u32)>> {
    let mut remove: HashSet<(String, u32)> = HashSet::new();
    let side_index = SideIndex::new(reactions);

    for (species, rates) in &table.species {
        for (number, series) in rates {
            let key = || (species.clone(), *number);
            if options.drop_zero && series.iter().all(|x| *x == 0.0) {
                remove.insert(key());
            }
            if options.drop_net_zero || options.drop_reversible {
                let equation = equation_of(reactions, *number)?;
                if options.drop_net_zero && equation.has_net_zero_species() {
                    remove.insert(key());
                }
                if options.drop_reversible
                    && side_index
                        .reverses_of(equation)
                        .iter()
                        .any(|other| other != number)
                {
                    remove.insert(key());
                }
            }
        }
    }
    Ok(remove)
}

/// Builds a new table without the entries selected by `options`.
pub fn prune(
    table: &RateTable,
    reactions: &ReactionDictionary,
    options: &PruneOptions,
) -> RateResult<RateTable> {
    let remove = removal_set(table, reactions, options)?;
    let pruned = without_keys(table, &remove);
    info!(
        "Pruned {} entries from the {} table ({:?})",
        remove.len(),
        table.direction,
        options
    );
    Ok(pruned)
}

/// copy of `table` without the given keys; missing keys are ignored
pub fn without_keys(table: &RateTable, remove: &HashSet<(String, u32)>) -> RateTable {
    let mut kept = RateTable::new(table.direction, table.times.clone());
    for (species, rates) in &table.species {
        let rates = rates
            .iter()
            .filter(|(number, _)| !remove.contains(&(species.clone(), **number)))
            .map(|(number, series)| (*number, series.clone()))
            .collect();
        kept.species.insert(species.clone(), rates);
    }
    kept.without_empty_species()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rates::errors::Direction;
    use indexmap::IndexMap;

    fn table(rows: &[(&str, u32, Vec<f64>)]) -> RateTable {
        let mut table = RateTable::new(Direction::Loss, vec![0.0, 1.0, 2.0]);
        for (species, number, series) in rows {
            table
                .species
                .entry(species.to_string())
                .or_insert_with(IndexMap::new)
                .insert(*number, series.clone());
        }
        table
    }

    fn only(drop_zero: bool, drop_net_zero: bool, drop_reversible: bool) -> PruneOptions {
        PruneOptions {
            drop_zero,
            drop_net_zero,
            drop_reversible,
        }
    }

    #[test]
    fn test_drop_zero_removes_empty_species() {
        let table = table(&[("HO2", 1, vec![0.0, 0.0, 0.0]), ("NO2", 2, vec![0.0, 1.0, 0.0])]);
        let dict = ReactionDictionary::from_texts(vec![(1, "HO2+O3=OH"), (2, "NO2+O3=NO3")])
            .unwrap();
        let pruned = prune(&table, &dict, &only(true, false, false)).unwrap();
        assert_eq!(pruned.species_names(), vec!["NO2"]);
        assert_eq!(pruned.get("NO2", 2), Some(&vec![0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_drop_net_zero_is_global() {
        let table = table(&[
            ("NO2", 1, vec![1.0, 1.0, 1.0]),
            ("NO3", 1, vec![1.0, 1.0, 1.0]),
            ("NO3", 2, vec![2.0, 2.0, 2.0]),
        ]);
        let dict =
            ReactionDictionary::from_texts(vec![(1, "NO3+NO2=NO+NO2+O2"), (2, "NO3+NO=NO2+NO2")])
                .unwrap();
        let pruned = prune(&table, &dict, &only(false, true, false)).unwrap();
        assert_eq!(pruned.species_names(), vec!["NO3"]);
        assert_eq!(pruned.get("NO3", 1), None);
        assert_eq!(pruned.get("NO3", 2), Some(&vec![2.0, 2.0, 2.0]));
    }

    #[test]
    fn test_drop_reversible_drops_both_members() {
        let table = table(&[
            ("NO2", 1, vec![1.0, 2.0, 3.0]),
            ("NO2", 2, vec![1.0, 1.0, 1.0]),
            ("NO2", 3, vec![4.0, 4.0, 4.0]),
        ]);
        let dict = ReactionDictionary::from_texts(vec![
            (1, "NO2+NO3=N2O5"),
            (2, "N2O5=NO3+NO2"),
            (3, "NO2+OH=HNO3"),
        ])
        .unwrap();
        let remove = removal_set(&table, &dict, &only(false, false, true)).unwrap();
        assert_eq!(remove.len(), 2);
        assert!(remove.contains(&("NO2".to_string(), 1)));
        assert!(remove.contains(&("NO2".to_string(), 2)));
        let pruned = prune(&table, &dict, &only(false, false, true)).unwrap();
        assert_eq!(pruned.species["NO2"].keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_key_queued_twice_is_removed_once() {
        let table = table(&[("NO2", 1, vec![0.0, 0.0, 0.0]), ("NO2", 2, vec![1.0, 1.0, 1.0])]);
        let dict =
            ReactionDictionary::from_texts(vec![(1, "NO2+NO3=NO+NO2+O2"), (2, "NO+O3=NO2")])
                .unwrap();
        let pruned = prune(&table, &dict, &PruneOptions::default()).unwrap();
        assert_eq!(pruned.species["NO2"].len(), 1);
        let again = without_keys(&pruned, &HashSet::from([("NO2".to_string(), 1)]));
        assert_eq!(again, pruned);
    }

    #[test]
    fn test_defaults_keep_reversible() {
        let options = PruneOptions::default();
        assert!(options.drop_zero);
        assert!(options.drop_net_zero);
        assert!(!options.drop_reversible);
    }
}
