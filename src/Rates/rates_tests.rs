/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Rates::analysis::{
        CONCENTRATION_FILE, LOSS_FILE, PRODUCTION_FILE, RateAnalysis, ReactionRestriction,
        output_file,
    };
    use crate::Rates::concentrations::read_concentrations;
    use crate::Rates::errors::{Direction, RateError};
    use crate::Rates::lumping::LumpSpec;
    use crate::Rates::pruner::{PruneOptions, prune};
    use crate::Rates::ranking::SeriesKey;
    use crate::Rates::rate_reader::read_rate_file;
    use crate::Rates::reversible::reconcile;
    use crate::Rates::species_filter::{SpeciesFamily, SpeciesSelection, select};
    use crate::Rates::time_window::TimeBound;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::{NamedTempFile, TempDir, tempdir};

    const HEADER: &str = "t speciesNumber speciesName reactionNumber rate reaction\n";

    fn write_file(content: &str) -> NamedTempFile {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    /// model output directory with production, loss and concentration files
    fn output_dir() -> TempDir {
        let dir = tempdir().unwrap();
        let production = format!(
            "{HEADER}\
0 1 NO3 1 1.0e4 NO2+O3=NO3
0 2 NO2 2 5.0e3 NO+O3=NO2
0 2 NO2 3 2.0e3 NO3+NO=NO2+NO2
0 2 NO2 4 0.0 HO2+NO=OH+NO2
600 1 NO3 1 2.0e4 NO2+O3=NO3
600 2 NO2 2 6.0e3 NO+O3=NO2
600 2 NO2 3 1.0e3 NO3+NO=NO2+NO2
600 2 NO2 4 0.0 HO2+NO=OH+NO2
1200 1 NO3 1 3.0e4 NO2+O3=NO3
1200 2 NO2 2 7.0e3 NO+O3=NO2
1200 2 NO2 3 5.0e2 NO3+NO=NO2+NO2
1200 2 NO2 4 0.0 HO2+NO=OH+NO2
"
        );
        let loss = format!(
            "{HEADER}\
0 1 NO3 7 3.0e3 NO3=NO2+O3
0 1 NO3 8 1.0e3 NO3+NO=NO2+NO2
0 2 NO2 9 4.0e3 NO2+O3=NO3
600 1 NO3 7 4.0e3 NO3=NO2+O3
600 1 NO3 8 1.0e3 NO3+NO=NO2+NO2
600 2 NO2 9 4.5e3 NO2+O3=NO3
1200 1 NO3 7 5.0e3 NO3=NO2+O3
1200 1 NO3 8 1.0e3 NO3+NO=NO2+NO2
1200 2 NO2 9 5.0e3 NO2+O3=NO3
"
        );
        let concentrations = "t NO3 NO2 O3
0 1.0e8 1.0e10 1.0e12
600 2.0e8 1.0e10 1.0e12
1200 0.0 1.0e10 1.0e12
";
        fs::write(dir.path().join(PRODUCTION_FILE), production).unwrap();
        fs::write(dir.path().join(LOSS_FILE), loss).unwrap();
        fs::write(dir.path().join(CONCENTRATION_FILE), concentrations).unwrap();
        dir
    }

    fn dir_str(dir: &TempDir) -> String {
        dir.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_two_file_reconciliation() {
        let production = write_file(&format!(
            "{HEADER}0 1 NO3 1 10 NO2+O3=NO3\n1 1 NO3 1 20 NO2+O3=NO3\n"
        ));
        let loss = write_file(&format!(
            "{HEADER}0 1 NO3 7 3 NO3=NO2+O3\n1 1 NO3 7 4 NO3=NO2+O3\n"
        ));
        let p = read_rate_file(production.path().to_str().unwrap(), Direction::Production)
            .unwrap();
        let l = read_rate_file(loss.path().to_str().unwrap(), Direction::Loss).unwrap();
        let reconciled = reconcile(&p.table, &p.reactions, &l.table, &l.reactions).unwrap();
        assert_eq!(reconciled.reversible.get("NO3", 1), Some(&vec![7.0, 16.0]));
        assert_eq!(reconciled.production.get("NO3", 1), None);
        assert_eq!(reconciled.loss.get("NO3", 7), None);
    }

    #[test]
    fn test_drop_zero_removes_species_read_from_file() {
        let production = write_file(&format!(
            "{HEADER}0 1 HO2 4 0 HO2+NO=OH+NO2\n1 1 HO2 4 0 HO2+NO=OH+NO2\n2 1 HO2 4 0 HO2+NO=OH+NO2\n"
        ));
        let file = read_rate_file(production.path().to_str().unwrap(), Direction::Production)
            .unwrap();
        assert_eq!(file.table.get("HO2", 4), Some(&vec![0.0, 0.0, 0.0]));
        let pruned = prune(&file.table, &file.reactions, &PruneOptions::default()).unwrap();
        assert!(pruned.is_empty());
    }

    #[test]
    fn test_nox_family_from_fixture() {
        let loss = write_file(&format!(
            "{HEADER}\
0 1 NO 1 2.0 NO+O3=NO2
0 2 O3 1 2.0 NO+O3=NO2
0 3 NO2 2 3.0 NO2+NO3=N2O5
0 4 NO3 2 3.0 NO2+NO3=N2O5
1 1 NO 1 4.0 NO+O3=NO2
1 2 O3 1 4.0 NO+O3=NO2
1 3 NO2 2 5.0 NO2+NO3=N2O5
1 4 NO3 2 5.0 NO2+NO3=N2O5
"
        ));
        let production = write_file(&format!(
            "{HEADER}\
0 5 N2O5 2 3.0 NO2+NO3=N2O5
1 5 N2O5 2 5.0 NO2+NO3=N2O5
"
        ));
        let nox = SpeciesSelection::Family(SpeciesFamily::nox());

        let l = read_rate_file(loss.path().to_str().unwrap(), Direction::Loss).unwrap();
        let lost = select(&l.table, &l.reactions, &nox, true).unwrap();
        assert_eq!(lost.get("NOx", 1), Some(&vec![2.0, 4.0]));
        assert_eq!(lost.get("NOx", 2), Some(&vec![6.0, 10.0]));
        let equation = l.reactions.get(2).unwrap();
        assert_eq!(SpeciesFamily::nox().member_count(equation, Direction::Production), 1);

        let p = read_rate_file(production.path().to_str().unwrap(), Direction::Production)
            .unwrap();
        let produced = select(&p.table, &p.reactions, &nox, true).unwrap();
        assert_eq!(produced.get("NOx", 2), Some(&vec![6.0, 10.0]));
    }

    #[test]
    fn test_plot_pipeline_from_output_dir() {
        let dir = output_dir();
        let selection: SpeciesSelection = "NO2,NO3".parse().unwrap();
        let options = PruneOptions {
            drop_reversible: true,
            ..PruneOptions::default()
        };
        let analysis = RateAnalysis::load(&dir_str(&dir), &selection, &options, false)
            .unwrap()
            .windowed(TimeBound::Start, TimeBound::End)
            .unwrap();
        // the zero rate reaction is gone, NO3=NO2+O3 and NO2+O3=NO3 are a reversible pair
        assert_eq!(analysis.production.table.species["NO2"].len(), 2);
        assert_eq!(analysis.loss.table.species_names(), vec!["NO3"]);
        let tables = analysis
            .plot_tables(1, &LumpSpec::new(), &LumpSpec::new())
            .unwrap();

        let loss = &tables.loss.rates.species["NO3"];
        assert_eq!(
            loss.keys().collect::<Vec<_>>(),
            vec![&SeriesKey::Reaction(8), &SeriesKey::Other]
        );
        assert_eq!(loss[&SeriesKey::Other], vec![0.0, 0.0, 0.0]);

        let no2 = &tables.production.rates.species["NO2"];
        assert_eq!(
            no2.keys().collect::<Vec<_>>(),
            vec![&SeriesKey::Reaction(2), &SeriesKey::Other]
        );
        for t in 0..3 {
            let total: f64 = no2.values().map(|s| s[t]).sum();
            let original = analysis.production.table.species["NO2"]
                .values()
                .map(|s| s[t])
                .sum::<f64>();
            assert_relative_eq!(total, original, epsilon = 1e-9);
            let percent: f64 = tables.production.percent.species["NO2"]
                .values()
                .map(|s| s[t])
                .sum();
            assert_relative_eq!(percent, 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_restrict_and_lump_from_output_dir() {
        let dir = output_dir();
        let analysis = RateAnalysis::load(
            &dir_str(&dir),
            &SpeciesSelection::All,
            &PruneOptions::default(),
            true,
        )
        .unwrap();
        let loss = ReactionRestriction {
            exclusive: vec![],
            remove: vec!["NO3+NO=NO2+NO2".to_string()],
        };
        let restricted = analysis
            .restricted(&ReactionRestriction::default(), &loss)
            .unwrap();
        assert_eq!(restricted.loss.table.get("NO3", 8), None);

        let lumps: LumpSpec =
            serde_json::from_str(r#"{"NO2": {"titration": ["NO+O3=NO2"]}}"#).unwrap();
        let tables = restricted.plot_tables(3, &lumps, &LumpSpec::new()).unwrap();
        let no2 = &tables.production.rates.species["NO2"];
        assert_eq!(no2.len(), 1);
        assert_eq!(
            no2[&SeriesKey::Category("titration".to_string())],
            vec![5.0e3, 6.0e3, 7.0e3]
        );
    }

    #[test]
    fn test_averages_from_output_dir() {
        let dir = output_dir();
        let selection: SpeciesSelection = "NO3".parse().unwrap();
        let summary = RateAnalysis::load(&dir_str(&dir), &selection, &PruneOptions::default(), true)
            .unwrap()
            .windowed(TimeBound::At(500.0), TimeBound::End)
            .unwrap()
            .averages(3)
            .unwrap();
        let reversible = &summary.reversible["NO3"][0];
        assert_eq!(reversible.reaction, 1);
        // (2e4 - 4e3 + 3e4 - 5e3) / 2
        assert_relative_eq!(reversible.mean, 20.5e3);
        assert!(summary.production.get("NO3").is_none());
    }

    #[test]
    fn test_averages_missing_species_is_error() {
        let dir = output_dir();
        let selection: SpeciesSelection = "OH".parse().unwrap();
        assert!(matches!(
            RateAnalysis::load(&dir_str(&dir), &selection, &PruneOptions::default(), true),
            Err(RateError::MissingSpecies { .. })
        ));
    }

    #[test]
    fn test_summed_net_rate_from_output_dir() {
        let dir = output_dir();
        let selection: SpeciesSelection = "NO3".parse().unwrap();
        let analysis =
            RateAnalysis::load(&dir_str(&dir), &selection, &PruneOptions::default(), true)
                .unwrap();
        let wanted = vec!["NO3".to_string()];
        let concs = read_concentrations(
            &output_file(&dir_str(&dir), CONCENTRATION_FILE),
            Some(wanted.as_slice()),
        )
        .unwrap();
        let net = analysis.summed_net_rate("NO3", &concs).unwrap();
        assert_eq!(net.len(), 3);
        assert_relative_eq!(net[0].1, (1.0e4 - 4.0e3) / 1.0e8);
        assert_relative_eq!(net[1].1, (2.0e4 - 5.0e3) / 2.0e8);
        assert_eq!(net[2], (1200.0, 0.0));
    }
}
