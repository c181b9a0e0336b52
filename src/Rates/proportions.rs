//! Percent contribution of every series to its species' total at each timestep.
//! A zero total gives zero proportions instead of NaN.
use super::rate_reader::Series;
use super::ranking::{ShapedTable, sum_series};
use indexmap::IndexMap;

pub fn proportion(value: f64, total: f64) -> f64 {
    if total != 0.0 { value / total * 100.0 } else { 0.0 }
}

/// same keys as `shaped`, values in percent of the species total
pub fn proportions(shaped: &ShapedTable) -> ShapedTable {
    let mut percent = ShapedTable::new(shaped.direction, shaped.times.clone());
    for (species, series) in &shaped.species {
        let total = sum_series(shaped.times.len(), series.values());
        let shares: IndexMap<_, Series> = series
            .iter()
            .map(|(key, values)| {
                let share = values
                    .iter()
                    .zip(&total)
                    .map(|(v, t)| proportion(*v, *t))
                    .collect();
                (key.clone(), share)
            })
            .collect();
        percent.species.insert(species.clone(), shares);
    }
    percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rates::errors::Direction;
    use crate::Rates::ranking::SeriesKey;
    use approx::assert_relative_eq;

    #[test]
    fn test_proportions_sum_to_hundred() {
        let mut shaped = ShapedTable::new(Direction::Production, vec![0.0, 1.0, 2.0]);
        let mut series = IndexMap::new();
        series.insert(SeriesKey::Reaction(1), vec![1.0, 0.0, 3.3]);
        series.insert(SeriesKey::Reaction(2), vec![3.0, 0.0, 1.7e-3]);
        series.insert(SeriesKey::Other, vec![0.0, 0.0, 12.0]);
        shaped.species.insert("HO2".to_string(), series);

        let percent = proportions(&shaped);
        assert_eq!(percent.get("HO2", &SeriesKey::Reaction(1)).unwrap()[0], 25.0);
        assert_eq!(percent.get("HO2", &SeriesKey::Reaction(2)).unwrap()[0], 75.0);
        for t in [0, 2] {
            let sum: f64 = percent.species["HO2"].values().map(|s| s[t]).sum();
            assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
        }
        // zero total
        assert!(percent.species["HO2"].values().all(|s| s[1] == 0.0));
    }

    #[test]
    fn test_proportion_of_zero_total() {
        assert_eq!(proportion(5.0, 0.0), 0.0);
        assert_eq!(proportion(1.0, 4.0), 25.0);
    }
}
