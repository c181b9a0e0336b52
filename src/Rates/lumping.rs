//! # Lumper
//!
//! User-directed re-aggregation: for a species named in the lump mapping, each
//! category collects a list of equation texts, every text is resolved through the
//! reaction dictionary's reverse index (one text may match several reaction
//! numbers) and the matching series are summed into one category series. Only the
//! listed categories survive for such a species; the other species keep their
//! ranked detail. Species missing from the mapping are kept in the report, not dropped.
use super::rate_reader::{RateTable, ReactionDictionary, Series};
use super::ranking::{SeriesKey, ShapedTable, sum_series};
use super::errors::RateResult;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// one equation text or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactionList {
    One(String),
    Many(Vec<String>),
}

impl ReactionList {
    pub fn texts(&self) -> &[String] {
        match self {
            ReactionList::One(text) => std::slice::from_ref(text),
            ReactionList::Many(texts) => texts,
        }
    }
}

/// species -> category -> equation texts
pub type LumpSpec = IndexMap<String, IndexMap<String, ReactionList>>;

/// Sums the series of the listed reactions of one species into category series.
/// Reactions that resolve but are absent for the species contribute nothing.
pub fn lump_species(
    source: &RateTable,
    reactions: &ReactionDictionary,
    species: &str,
    categories: &IndexMap<String, ReactionList>,
) -> RateResult<IndexMap<SeriesKey, Series>> {
    let rates = source.species.get(species);
    let mut lumped = IndexMap::new();
    for (category, list) in categories {
        let numbers = reactions.resolve_all(list.texts())?;
        let series = sum_series(
            source.times.len(),
            numbers
                .iter()
                .filter_map(|number| rates.and_then(|r| r.get(number))),
        );
        lumped.insert(SeriesKey::Category(category.clone()), series);
    }
    Ok(lumped)
}

/// Replaces the ranked detail of every species named in `spec` by its categories.
/// `source` is the filtered table the ranking was computed from.
pub fn apply_lumps(
    mut ranked: ShapedTable,
    source: &RateTable,
    reactions: &ReactionDictionary,
    spec: &LumpSpec,
) -> RateResult<ShapedTable> {
    for (species, categories) in spec {
        let lumped = lump_species(source, reactions, species, categories)?;
        if !source.species.contains_key(species) {
            warn!(
                "{} is not in the {} table, lumps ignored",
                species, source.direction
            );
            continue;
        }
        ranked.species.insert(species.clone(), lumped);
        info!(
            "Lumped {} {} into {} categories",
            source.direction,
            species,
            categories.len()
        );
    }
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rates::errors::{Direction, RateError};
    use crate::Rates::ranking::{Statistic, top_n_with_other};

    fn table(rows: &[(&str, u32, Vec<f64>)]) -> RateTable {
        let mut table = RateTable::new(Direction::Loss, vec![0.0, 1.0]);
        for (species, number, series) in rows {
            table
                .species
                .entry(species.to_string())
                .or_insert_with(IndexMap::new)
                .insert(*number, series.clone());
        }
        table
    }

    fn spec(json: &str) -> LumpSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_category_replaces_detail() {
        let source = table(&[("NO2", 3, vec![5.0, 5.0]), ("NO2", 4, vec![1.0, 1.0])]);
        let dict = ReactionDictionary::from_texts(vec![(3, "NO2+O3=NO3"), (4, "NO2+OH=HNO3")])
            .unwrap();
        let ranked = top_n_with_other(&source, 5, Statistic::Median);
        let lumped = apply_lumps(
            ranked,
            &source,
            &dict,
            &spec(r#"{"NO2": {"NOx": ["NO2+O3=NO3"]}}"#),
        )
        .unwrap();
        assert_eq!(
            lumped.get("NO2", &SeriesKey::Category("NOx".to_string())),
            Some(&vec![5.0, 5.0])
        );
        assert_eq!(lumped.species["NO2"].len(), 1);
    }

    #[test]
    fn test_text_matching_several_numbers_is_summed() {
        let source = table(&[
            ("OH", 1, vec![1.0, 2.0]),
            ("OH", 2, vec![10.0, 20.0]),
            ("OH", 5, vec![7.0, 7.0]),
            ("HO2", 5, vec![1.0, 1.0]),
        ]);
        let dict = ReactionDictionary::from_texts(vec![
            (1, "OH+CO=HO2"),
            (2, "OH+CO=HO2"),
            (5, "OH+O3=HO2"),
        ])
        .unwrap();
        let ranked = top_n_with_other(&source, 1, Statistic::Median);
        let lumped = apply_lumps(
            ranked,
            &source,
            &dict,
            &spec(r#"{"OH": {"CO": "OH+CO=HO2", "O3": ["OH+O3=HO2"]}}"#),
        )
        .unwrap();
        assert_eq!(
            lumped.get("OH", &SeriesKey::Category("CO".to_string())),
            Some(&vec![11.0, 22.0])
        );
        assert_eq!(
            lumped.get("OH", &SeriesKey::Category("O3".to_string())),
            Some(&vec![7.0, 7.0])
        );
        // species outside the mapping keep their ranked series
        assert!(lumped.get("HO2", &SeriesKey::Reaction(5)).is_some());
        assert!(lumped.get("HO2", &SeriesKey::Other).is_some());
    }

    #[test]
    fn test_unknown_text_is_lookup_error() {
        let source = table(&[("NO2", 3, vec![5.0, 5.0])]);
        let dict = ReactionDictionary::from_texts(vec![(3, "NO2+O3=NO3")]).unwrap();
        let ranked = top_n_with_other(&source, 5, Statistic::Median);
        let result = apply_lumps(
            ranked,
            &source,
            &dict,
            &spec(r#"{"NO2": {"X": ["NO2=NO+O"]}}"#),
        );
        match result {
            Err(RateError::Lookup(text)) => assert_eq!(text, "NO2=NO+O"),
            other => panic!("expected lookup error, got {:?}", other),
        }
    }
}
