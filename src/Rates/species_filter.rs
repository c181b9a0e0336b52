//! # Species Filter
//!
//! Restricts a rate table to the species the user asked for: every species (`ALL`),
//! a list of names, or a family such as `NOx` whose rates are the constituent
//! species' rates weighted by how many family members (nitrogen atoms) each
//! reaction moves.
//!
//! ## Family multiplicity
//! For a production table the product side of each equation is inspected, for a loss
//! table the reactant side. Species on that side are deduplicated first (the model
//! already scales per-species rates by the stoichiometric coefficient), then each
//! family member contributes its weight: `N2O5` counts 2, the other members 1.
//!
//! When several family members share a reaction the last one read provides the
//! series. The underlying reaction rate is assumed to be identical for all of them;
//! a differing series is reported with a warning, not rejected.
use super::equation::Equation;
use super::errors::{Direction, RateError, RateResult};
use super::rate_reader::{RateTable, ReactionDictionary, Series, SpeciesRates};
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// relative tolerance used when cross-checking family member series
const FAMILY_RATE_RTOL: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesFamily {
    pub name: String,
    /// member species and the weight each one contributes
    pub members: Vec<(String, f64)>,
}

impl SpeciesFamily {
    pub fn nox() -> Self {
        Self {
            name: "NOx".to_string(),
            members: vec![
                ("NO".to_string(), 1.0),
                ("NO2".to_string(), 1.0),
                ("NO3".to_string(), 1.0),
                ("N2O5".to_string(), 2.0),
            ],
        }
    }

    pub fn weight(&self, species: &str) -> Option<f64> {
        self.members
            .iter()
            .find(|(name, _)| name == species)
            .map(|(_, w)| *w)
    }

    fn counted_side<'a>(equation: &'a Equation, direction: Direction) -> BTreeSet<&'a str> {
        match direction {
            Direction::Loss => equation.reactant_set(),
            _ => equation.product_set(),
        }
    }

    /// number of distinct family members on the counted side, before weighting
    pub fn member_count(&self, equation: &Equation, direction: Direction) -> usize {
        Self::counted_side(equation, direction)
            .into_iter()
            .filter(|s| self.weight(s).is_some())
            .count()
    }

    /// weighted family count of the reaction, the factor applied to its rate
    pub fn multiplicity(&self, equation: &Equation, direction: Direction) -> f64 {
        Self::counted_side(equation, direction)
            .into_iter()
            .filter_map(|s| self.weight(s))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeciesSelection {
    All,
    Family(SpeciesFamily),
    Named(Vec<String>),
}

impl FromStr for SpeciesSelection {
    type Err = RateError;

    /// `ALL`, `NOx`, a single name or a comma separated list (optionally in `[...]`)
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let trimmed = arg.trim();
        if trimmed == "ALL" {
            return Ok(SpeciesSelection::All);
        }
        if trimmed == "NOx" {
            return Ok(SpeciesSelection::Family(SpeciesFamily::nox()));
        }
        let names: Vec<String> = trimmed
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|s| s.trim().trim_matches(|c: char| c == '\'' || c == '"').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            return Err(RateError::Usage(format!(
                "no species given in '{}'",
                arg
            )));
        }
        Ok(SpeciesSelection::Named(names))
    }
}

/// Reduces `table` to the selected species. Unknown names fail with
/// `MissingSpecies` when `error_for_missing` is set and are skipped otherwise.
pub fn select(
    table: &RateTable,
    reactions: &ReactionDictionary,
    selection: &SpeciesSelection,
    error_for_missing: bool,
) -> RateResult<RateTable> {
    let mut selected = RateTable::new(table.direction, table.times.clone());
    match selection {
        SpeciesSelection::All => {
            selected.species = table.species.clone();
        }
        SpeciesSelection::Named(names) => {
            for name in names {
                match table.species.get(name) {
                    Some(rates) => {
                        selected.species.insert(name.clone(), rates.clone());
                    }
                    None if error_for_missing => {
                        return Err(RateError::MissingSpecies {
                            species: name.clone(),
                            table: table.direction.to_string(),
                        });
                    }
                    None => warn!("{} is not in the {} table, skipped", name, table.direction),
                }
            }
        }
        SpeciesSelection::Family(family) => {
            let rates = family_rates(table, reactions, family)?;
            selected.species.insert(family.name.clone(), rates);
        }
    }
    info!(
        "Selected {} species from the {} table",
        selected.species.len(),
        table.direction
    );
    Ok(selected)
}

fn family_rates(
    table: &RateTable,
    reactions: &ReactionDictionary,
    family: &SpeciesFamily,
) -> RateResult<SpeciesRates> {
    let mut rates = SpeciesRates::new();
    let mut unweighted: HashMap<u32, (&str, &Series)> = HashMap::new();
    for (species, species_rates) in &table.species {
        if family.weight(species).is_none() {
            continue;
        }
        for (number, series) in species_rates {
            let equation = reactions
                .get(*number)
                .ok_or_else(|| RateError::Lookup(format!("reaction number {}", number)))?;
            if let Some((first_species, first)) = unweighted.get(number) {
                if !series_match(first, series) {
                    warn!(
                        "reaction {} ({}) has different {} rates for {} and {}; using {}",
                        number, equation, table.direction, first_species, species, species
                    );
                }
            }
            unweighted.insert(*number, (species.as_str(), series));
            let factor = family.multiplicity(equation, table.direction);
            rates.insert(*number, series.iter().map(|x| x * factor).collect());
        }
    }
    Ok(rates)
}

fn series_match(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            (x - y).abs() <= FAMILY_RATE_RTOL * x.abs().max(y.abs())
        })
}
