//! # Rate Table Reader
//!
//! Parses `productionRates.output` / `lossRates.output` files of the box model into
//! typed structures. Each data line has the columns
//!
//! `time  speciesNumber  speciesName  reactionNumber  rate  reaction`
//!
//! (the speciesNumber column is not used). The same (species, reactionNumber) key is
//! repeated once per timestep, so the reader accumulates rates in file order into one
//! series per key and checks afterwards that every series covers the whole time axis.
//!
//! Reading the same file twice gives identical output, and [`RateFile::write_to`]
//! writes a file that reads back to the same tables.
use super::equation::Equation;
use super::errors::{Direction, RateError, RateResult};
use crate::Utils::load_from_file::{load_whitespace_table, parse_field};
use indexmap::IndexMap;
use log::info;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};

/// one rate value per timestep, molecule cm-3 s-1
pub type Series = Vec<f64>;
/// reaction number -> series, for one species
pub type SpeciesRates = IndexMap<u32, Series>;

/// species -> reaction number -> series, aligned with `times`
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub direction: Direction,
    pub times: Vec<f64>,
    pub species: IndexMap<String, SpeciesRates>,
}

impl RateTable {
    pub fn new(direction: Direction, times: Vec<f64>) -> Self {
        Self {
            direction,
            times,
            species: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, species: &str, reaction: u32) -> Option<&Series> {
        self.species.get(species).and_then(|rates| rates.get(&reaction))
    }

    pub fn species_names(&self) -> Vec<&str> {
        self.species.keys().map(String::as_str).collect()
    }

    /// drops species that have no reactions left
    pub fn without_empty_species(mut self) -> Self {
        self.species.retain(|_, rates| !rates.is_empty());
        self
    }

    /// checks that every series has one value per timestep
    pub fn check_alignment(&self) -> RateResult<()> {
        for (species, rates) in &self.species {
            for (number, series) in rates {
                if series.len() != self.times.len() {
                    return Err(RateError::UnalignedSeries(format!(
                        "{} series of {} for reaction {} has {} values, time axis has {}",
                        self.direction,
                        species,
                        number,
                        series.len(),
                        self.times.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// reaction number -> equation, with a reverse index equation text -> numbers built once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionDictionary {
    equations: IndexMap<u32, Equation>,
    by_text: HashMap<String, Vec<u32>>,
}

impl ReactionDictionary {
    pub fn new(equations: IndexMap<u32, Equation>) -> Self {
        let mut by_text: HashMap<String, Vec<u32>> = HashMap::new();
        for (number, equation) in &equations {
            by_text
                .entry(equation.text.clone())
                .or_default()
                .push(*number);
        }
        Self { equations, by_text }
    }

    /// parses `(number, text)` pairs; later duplicates of a number replace earlier ones
    pub fn from_texts<'a, I>(pairs: I) -> RateResult<Self>
    where
        I: IntoIterator<Item = (u32, &'a str)>,
    {
        let mut equations = IndexMap::new();
        for (number, text) in pairs {
            equations.insert(number, text.parse::<Equation>()?);
        }
        Ok(Self::new(equations))
    }

    pub fn get(&self, number: u32) -> Option<&Equation> {
        self.equations.get(&number)
    }

    pub fn text(&self, number: u32) -> Option<&str> {
        self.equations.get(&number).map(|eq| eq.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Equation)> {
        self.equations.iter().map(|(n, eq)| (*n, eq))
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// all reaction numbers carrying this equation text
    pub fn numbers_for(&self, text: &str) -> RateResult<&[u32]> {
        self.by_text
            .get(text)
            .map(Vec::as_slice)
            .ok_or_else(|| RateError::Lookup(text.to_string()))
    }

    /// resolves a list of equation texts, failing on the first unknown one
    pub fn resolve_all(&self, texts: &[String]) -> RateResult<Vec<u32>> {
        let mut numbers = Vec::new();
        for text in texts {
            numbers.extend_from_slice(self.numbers_for(text)?);
        }
        Ok(numbers)
    }
}

/// everything one rate output file holds
#[derive(Debug, Clone, PartialEq)]
pub struct RateFile {
    pub reactions: ReactionDictionary,
    pub table: RateTable,
}

impl RateFile {
    pub fn times(&self) -> &[f64] {
        &self.table.times
    }

    /// Writes the file back in the box-model layout, one line per
    /// (timestep, species, reaction).
    pub fn write_to(&self, file_name: &str) -> RateResult<()> {
        self.table.check_alignment()?;
        let mut out = BufWriter::new(File::create(file_name)?);
        writeln!(
            out,
            "t speciesNumber speciesName reactionNumber rate reaction"
        )?;
        for (i, time) in self.table.times.iter().enumerate() {
            for (species_number, (species, rates)) in self.table.species.iter().enumerate() {
                for (number, series) in rates {
                    let text = self.reactions.text(*number).ok_or_else(|| {
                        RateError::Lookup(format!("reaction number {}", number))
                    })?;
                    writeln!(
                        out,
                        "{} {} {} {} {:e} {}",
                        time,
                        species_number + 1,
                        species,
                        number,
                        series[i],
                        text
                    )?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// Reads a rate output file: distinct sorted time axis, reaction dictionary and the
/// species -> reaction -> series table.
pub fn read_rate_file(file_name: &str, direction: Direction) -> RateResult<RateFile> {
    let raw = load_whitespace_table(file_name)?;

    let mut times: Vec<f64> = Vec::new();
    let mut equations: IndexMap<u32, Equation> = IndexMap::new();
    let mut species: IndexMap<String, SpeciesRates> = IndexMap::new();
    let mut last_line: HashMap<(String, u32), usize> = HashMap::new();

    for (line, fields) in &raw.rows {
        if fields.len() < 6 {
            return Err(raw.parse_error(
                *line,
                format!("expected at least 6 columns, found {}", fields.len()),
            ));
        }
        let time: f64 = parse_field(&raw, *line, fields, 0, "time")?;
        if !time.is_finite() {
            return Err(raw.parse_error(*line, format!("time '{}' is not finite", fields[0])));
        }
        let name = fields[2].clone();
        let number: u32 = parse_field(&raw, *line, fields, 3, "reaction number")?;
        let rate: f64 = parse_field(&raw, *line, fields, 4, "rate")?;
        let equation: Equation = fields[5]
            .parse()
            .map_err(|e: RateError| raw.parse_error(*line, e.to_string()))?;

        times.push(time);
        equations.insert(number, equation);
        species
            .entry(name.clone())
            .or_default()
            .entry(number)
            .or_default()
            .push(rate);
        last_line.insert((name, number), *line);
    }

    times.sort_by(f64::total_cmp);
    times.dedup();

    for (name, rates) in &species {
        for (number, series) in rates {
            if series.len() != times.len() {
                let line = last_line
                    .get(&(name.clone(), *number))
                    .copied()
                    .unwrap_or(1);
                return Err(raw.parse_error(
                    line,
                    format!(
                        "species {} reaction {} has {} rates for {} timesteps",
                        name,
                        number,
                        series.len(),
                        times.len()
                    ),
                ));
            }
        }
    }

    info!(
        "{} file '{}': {} timesteps, {} reactions, {} species",
        direction,
        file_name,
        times.len(),
        equations.len(),
        species.len()
    );
    Ok(RateFile {
        reactions: ReactionDictionary::new(equations),
        table: RateTable {
            direction,
            times,
            species,
        },
    })
}
