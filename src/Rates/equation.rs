//! # Equation Text Module
//!
//! Rate output files describe every reaction by a compact equation text such as
//! `NO2+O3=NO3`: reactants and products are `+`-joined species tokens separated by
//! a single `=`, without whitespace. This module turns that text into a typed
//! [`Equation`] so that the pruner, the reversible-pair reconciler and the `NOx`
//! family filter never split strings themselves.
//!
//! Reactants and products are kept as ordered multisets (token order of the file,
//! duplicates preserved). Reverse-reaction matching uses set semantics, i.e.
//! repeated species are deduplicated before comparison.
use super::errors::{RateError, RateResult};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub text: String,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

fn parse_side(text: &str, side: &str) -> RateResult<Vec<String>> {
    if side.is_empty() {
        return Ok(Vec::new());
    }
    side.split('+')
        .map(|token| {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                Err(RateError::Equation {
                    text: text.to_string(),
                    message: format!("bad species token '{}'", token),
                })
            } else {
                Ok(token.to_string())
            }
        })
        .collect()
}

impl FromStr for Equation {
    type Err = RateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (lhs, rhs) = text.split_once('=').ok_or_else(|| RateError::Equation {
            text: text.to_string(),
            message: "missing '='".to_string(),
        })?;
        if rhs.contains('=') {
            return Err(RateError::Equation {
                text: text.to_string(),
                message: "more than one '='".to_string(),
            });
        }
        Ok(Equation {
            text: text.to_string(),
            reactants: parse_side(text, lhs)?,
            products: parse_side(text, rhs)?,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Equation {
    pub fn reactant_set(&self) -> BTreeSet<&str> {
        self.reactants.iter().map(String::as_str).collect()
    }

    pub fn product_set(&self) -> BTreeSet<&str> {
        self.products.iter().map(String::as_str).collect()
    }

    pub fn reactant_count(&self, species: &str) -> usize {
        self.reactants.iter().filter(|s| *s == species).count()
    }

    pub fn product_count(&self, species: &str) -> usize {
        self.products.iter().filter(|s| *s == species).count()
    }

    /// true if `other` runs this reaction backwards:
    /// reactants(self) == products(other) and products(self) == reactants(other)
    pub fn is_reverse_of(&self, other: &Equation) -> bool {
        self.reactant_set() == other.product_set() && self.product_set() == other.reactant_set()
    }

    /// true if some product species appears with the same count among the reactants,
    /// e.g. `NO3+NO2=NO+NO2+O2` for NO2
    pub fn has_net_zero_species(&self) -> bool {
        self.products
            .iter()
            .any(|s| self.reactant_count(s) == self.product_count(s))
    }
}
