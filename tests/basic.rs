use anyhow::Result;
use std::io::Write;
use tripfinder::{load_path, load_reader, Column, DestinationRecord, Error, Params, Preferences, Recommender};

fn record(name: &str, cost: f64, travel_type: &str, climate: &str, season: &str, days: u32) -> DestinationRecord {
    DestinationRecord {
        name: name.into(),
        cost,
        duration_days: days,
        travel_type: travel_type.into(),
        climate: climate.into(),
        season: season.into(),
    }
}

fn three_rows() -> Vec<DestinationRecord> {
    vec![
        record("A", 1000.0, "Beach", "Hot", "Summer", 3),
        record("B", 1200.0, "Beach", "Hot", "Summer", 4),
        record("C", 5000.0, "Mountain", "Cold", "Winter", 10),
    ]
}

fn beach_prefs() -> Preferences {
    Preferences {
        budget: 1000.0,
        duration_days: 3,
        travel_type: "Beach".into(),
        climate: "Hot".into(),
        season: "Summer".into(),
    }
}

#[test]
fn closest_match_vs_cheapest_per_day() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let result = recommender.recommend_with_k(&beach_prefs(), 2)?;
    assert_eq!(result.len(), 2);
    assert_eq!(result.matches[0].record.name, "A");
    assert_eq!(result.matches[0].distance, 0.0);
    assert_eq!(result.matches[1].record.name, "B");
    assert_eq!(result.matches[0].cost_per_day, 333.33);
    assert_eq!(result.matches[1].cost_per_day, 300.0);
    assert_eq!(result.cheapest, 1);
    assert_eq!(result.cheapest_match().map(|m| m.record.name.as_str()), Some("B"));
    Ok(())
}

#[test]
fn cheapest_tie_takes_first_in_result_order() -> Result<()> {
    let records = vec![
        record("far", 600.0, "Beach", "Hot", "Summer", 3),
        record("near", 400.0, "Beach", "Hot", "Summer", 2),
    ];
    let recommender = Recommender::new(records)?;
    let result = recommender.recommend(&Preferences {
        budget: 400.0,
        duration_days: 2,
        ..beach_prefs()
    })?;
    assert_eq!(result.matches[0].record.name, "near");
    assert_eq!(result.matches[0].cost_per_day, result.matches[1].cost_per_day);
    assert_eq!(result.cheapest, 0);
    Ok(())
}

#[test]
fn rounded_tie_keeps_closer_match_as_cheapest() -> Result<()> {
    // 1001 / 8 = 125.125 rounds to 125.12, the same as 375.36 / 3
    let records = vec![
        record("X", 1001.0, "Beach", "Hot", "Summer", 8),
        record("Y", 375.36, "Beach", "Hot", "Summer", 3),
    ];
    let recommender = Recommender::new(records)?;
    let result = recommender.recommend(&Preferences {
        budget: 1001.0,
        duration_days: 8,
        ..beach_prefs()
    })?;
    assert_eq!(result.matches[0].record.name, "X");
    assert_eq!(result.matches[0].distance, 0.0);
    assert_eq!(result.matches[0].cost_per_day, 125.12);
    assert_eq!(result.matches[1].cost_per_day, 125.12);
    assert_eq!(result.cheapest, 0);
    Ok(())
}

#[test]
fn matches_point_back_at_index_rows() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let result = recommender.recommend(&beach_prefs())?;
    for m in &result.matches {
        assert_eq!(recommender.index().record(m.row), Some(&m.record));
    }
    Ok(())
}

#[test]
fn unknown_category() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let prefs = Preferences {
        travel_type: "Desert".into(),
        ..beach_prefs()
    };
    let err = recommender.recommend(&prefs).unwrap_err();
    match err {
        Error::UnknownCategory { column, value } => {
            assert_eq!(column, Column::TravelType);
            assert_eq!(value, "Desert");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(recommender.encoding().encode(Column::Season, "Autumn").is_err());
    Ok(())
}

#[test]
fn invalid_query() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let zero_days = Preferences {
        duration_days: 0,
        ..beach_prefs()
    };
    assert!(matches!(recommender.recommend(&zero_days), Err(Error::InvalidQuery(_))));
    let nan_budget = Preferences {
        budget: f64::NAN,
        ..beach_prefs()
    };
    assert!(matches!(recommender.recommend(&nan_budget), Err(Error::InvalidQuery(_))));
    assert!(matches!(
        recommender.recommend_with_k(&beach_prefs(), 0),
        Err(Error::InvalidQuery(_))
    ));
    assert!(Recommender::with_params(three_rows(), Params { k: 0 }).is_err());
    Ok(())
}

#[test]
fn k_is_clamped_to_dataset_size() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    assert_eq!(recommender.params().k, 5);
    let result = recommender.recommend(&beach_prefs())?;
    assert_eq!(result.len(), 3);
    assert_eq!(result.matches[2].record.name, "C");
    Ok(())
}

#[test]
fn repeated_queries_are_identical() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let first = recommender.recommend(&beach_prefs())?;
    let second = recommender.recommend(&beach_prefs())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn batch_matches_sequential() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    let prefs = vec![
        beach_prefs(),
        Preferences {
            budget: 4800.0,
            duration_days: 9,
            travel_type: "Mountain".into(),
            climate: "Cold".into(),
            season: "Winter".into(),
        },
        Preferences {
            climate: "Tropical".into(),
            ..beach_prefs()
        },
    ];
    let batch = recommender.recommend_batch(&prefs);
    assert_eq!(batch.len(), 3);
    for (p, b) in prefs.iter().zip(batch.iter()) {
        match (recommender.recommend(p), b) {
            (Ok(seq), Ok(par)) => assert_eq!(&seq, par),
            (Err(_), Err(_)) => {}
            _ => panic!("batch and sequential disagree"),
        }
    }
    assert_eq!(batch[1].as_ref().map(|r| r.matches[0].record.name.clone()).ok(), Some("C".to_string()));
    Ok(())
}

#[test]
fn options_list_observed_values() -> Result<()> {
    let recommender = Recommender::new(three_rows())?;
    assert_eq!(recommender.options(Column::TravelType), &["Beach", "Mountain"]);
    assert_eq!(recommender.options(Column::Climate), &["Cold", "Hot"]);
    assert_eq!(recommender.options(Column::Season), &["Summer", "Winter"]);
    Ok(())
}

#[test]
fn all_costs_missing_is_empty_dataset() -> Result<()> {
    let csv = "\
Destination,Cost,Type,Climate,Season,Duration_days
A,,Beach,Hot,Summer,3
B,,Beach,Hot,Summer,4
C,n/a,Mountain,Cold,Winter,10
";
    assert!(matches!(load_reader(csv.as_bytes()), Err(Error::EmptyDataset)));

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(csv.as_bytes())?;
    file.flush()?;
    assert!(matches!(load_path(file.path()), Err(Error::EmptyDataset)));
    assert!(matches!(Recommender::from_path(file.path()), Err(Error::EmptyDataset)));
    assert!(matches!(Recommender::new(Vec::new()), Err(Error::EmptyDataset)));
    Ok(())
}

#[test]
fn missing_file() {
    let err = Recommender::from_path("does/not/exist.csv").err().unwrap();
    assert!(matches!(err, Error::Io(_)));
}
