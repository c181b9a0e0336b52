//! Reader for `speciesConcentrations.output`: a header row of species names whose
//! first column is `t`, then one row per timestep. Used to turn summed rates in
//! molecule cm-3 s-1 into first-order rates in s-1.
use super::errors::{RateError, RateResult};
use crate::Utils::load_from_file::{load_whitespace_table, parse_field};
use indexmap::IndexMap;
use log::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationTable {
    pub times: Vec<f64>,
    pub species: IndexMap<String, Vec<f64>>,
}

impl ConcentrationTable {
    /// concentration of `species` at exactly `time`
    pub fn value_at(&self, species: &str, time: f64) -> RateResult<f64> {
        let column = self
            .species
            .get(species)
            .ok_or_else(|| RateError::MissingSpecies {
                species: species.to_string(),
                table: "concentration".to_string(),
            })?;
        let index = self
            .times
            .iter()
            .position(|t| *t == time)
            .ok_or_else(|| {
                RateError::UnalignedSeries(format!(
                    "timestep {} is missing from the concentration file",
                    time
                ))
            })?;
        Ok(column[index])
    }
}

/// Reads the concentration file, keeping only `species` (all species when `None`).
pub fn read_concentrations(
    file_name: &str,
    species: Option<&[String]>,
) -> RateResult<ConcentrationTable> {
    let raw = load_whitespace_table(file_name)?;
    if raw.header.first().map(String::as_str) != Some("t") {
        return Err(raw.parse_error(1, "first header column must be 't'"));
    }
    if let Some(wanted) = species {
        for name in wanted {
            if !raw.header.iter().skip(1).any(|h| h == name) {
                return Err(RateError::MissingSpecies {
                    species: name.clone(),
                    table: "concentration".to_string(),
                });
            }
        }
    }

    let mut times = Vec::with_capacity(raw.rows.len());
    let mut columns: IndexMap<String, Vec<f64>> = IndexMap::new();
    for (line, fields) in &raw.rows {
        if fields.len() != raw.header.len() {
            return Err(raw.parse_error(
                *line,
                format!(
                    "expected {} columns, found {}",
                    raw.header.len(),
                    fields.len()
                ),
            ));
        }
        times.push(parse_field::<f64>(&raw, *line, fields, 0, "time")?);
        for (column, name) in raw.header.iter().enumerate().skip(1) {
            let keep = species.map_or(true, |wanted| wanted.contains(name));
            if keep {
                let value: f64 = parse_field(&raw, *line, fields, column, name)?;
                columns.entry(name.clone()).or_default().push(value);
            }
        }
    }
    info!(
        "Read concentrations of {} species at {} timesteps from '{}'",
        columns.len(),
        times.len(),
        file_name
    );
    Ok(ConcentrationTable {
        times,
        species: columns,
    })
}
