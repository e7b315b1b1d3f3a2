use super::*;

fn record(event_type: &str, venue: &str, guests: f64, budget: f64) -> EventRecord {
    EventRecord {
        event_type: event_type.to_string(),
        venue: venue.to_string(),
        schedule_slot: "noche".to_string(),
        catering: "bufet".to_string(),
        music: "dj".to_string(),
        decor: "floral".to_string(),
        guest_count: guests,
        budget,
    }
}

fn training_set() -> Vec<EventRecord> {
    vec![
        record("boda", "salon", 100.0, 50000.0),
        record("fiesta", "jardin", 40.0, 12000.0),
        record("conferencia", "auditorio", 250.0, 80000.0),
        record("boda", "jardin", 80.0, 45000.0),
    ]
}

#[test]
fn fit_rejects_empty_training_set() {
    let err = FeatureEncoder::fit(&[]).unwrap_err();
    assert!(matches!(err, EncodingError::EmptyTrainingSet));
}

#[test]
fn feature_width_counts_numerics_and_vocabularies() {
    let artifacts = FeatureEncoder::fit(&training_set()).expect("fit");
    // 2 numerics + tipo_evento{boda,conferencia,fiesta} + lugar{auditorio,jardin,salon}
    // + 1 each for the four constant fields.
    assert_eq!(artifacts.feature_width(), 2 + 3 + 3 + 1 + 1 + 1 + 1);
    let vector = artifacts.transform(&training_set()[0]);
    assert_eq!(vector.len(), artifacts.feature_width());
}

#[test]
fn vocabularies_are_sorted_regardless_of_row_order() {
    let mut reversed = training_set();
    reversed.reverse();
    let a = FeatureEncoder::fit(&training_set()).expect("fit");
    let b = FeatureEncoder::fit(&reversed).expect("fit");
    assert_eq!(a.encoder, b.encoder);
    assert_eq!(
        a.encoder.fields[0].categories,
        vec!["boda", "conferencia", "fiesta"]
    );
}

#[test]
fn transform_is_deterministic() {
    let artifacts = FeatureEncoder::fit(&training_set()).expect("fit");
    let rec = record("boda", "salon", 100.0, 50000.0);
    let first = artifacts.transform(&rec);
    for _ in 0..10 {
        assert_eq!(artifacts.transform(&rec), first);
    }
}

#[test]
fn known_category_sets_exactly_one_column() {
    let artifacts = FeatureEncoder::fit(&training_set()).expect("fit");
    for rec in training_set() {
        let vector = artifacts.transform(&rec);
        let mut offset = 2;
        for vocab in &artifacts.encoder.fields {
            let block = &vector[offset..offset + vocab.width()];
            let ones = block.iter().filter(|&&v| v == 1.0).count();
            let zeros = block.iter().filter(|&&v| v == 0.0).count();
            assert_eq!(ones, 1, "field {:?} should have one hot column", vocab.field);
            assert_eq!(ones + zeros, vocab.width());
            offset += vocab.width();
        }
    }
}

#[test]
fn unknown_category_yields_all_zero_block() {
    let artifacts = FeatureEncoder::fit(&training_set()).expect("fit");
    let rec = record("graduacion", "playa", 60.0, 20000.0);
    let vector = artifacts.transform(&rec);
    // tipo_evento block (width 3) and lugar block (width 3) both all-zero.
    assert!(vector[2..8].iter().all(|&v| v == 0.0));
    assert_eq!(vector.len(), artifacts.feature_width());
}

#[test]
fn standardized_training_columns_have_zero_mean_unit_std() {
    let records = training_set();
    let artifacts = FeatureEncoder::fit(&records).expect("fit");
    let matrix = artifacts.transform_all(&records);
    let n = matrix.len() as f64;
    for col in 0..2 {
        let mean = matrix.iter().map(|row| row[col]).sum::<f64>() / n;
        let var = matrix.iter().map(|row| (row[col] - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 1e-9, "column {} mean {}", col, mean);
        assert!((var.sqrt() - 1.0).abs() < 1e-9, "column {} std {}", col, var.sqrt());
    }
}

#[test]
fn zero_variance_numeric_column_maps_to_zero() {
    let records = vec![
        record("boda", "salon", 100.0, 30000.0),
        record("fiesta", "jardin", 100.0, 60000.0),
    ];
    let artifacts = FeatureEncoder::fit(&records).expect("fit");
    // guest_count is constant, so its fitted std is zero.
    assert_eq!(artifacts.scaler.stats[0].std, 0.0);
    let vector = artifacts.transform(&record("boda", "salon", 9999.0, 30000.0));
    assert_eq!(vector[0], 0.0);
    assert!(vector[1].is_finite());
}

#[test]
fn missing_field_defaults_encode_without_error() {
    let artifacts = FeatureEncoder::fit(&training_set()).expect("fit");
    // The adapter's leniency policy: absent categoricals become empty strings,
    // absent numerics become zero. Both must flow through transform cleanly.
    let rec = EventRecord::default();
    let vector = artifacts.transform(&rec);
    assert_eq!(vector.len(), artifacts.feature_width());
    assert!(vector.iter().all(|v| v.is_finite()));
    assert!(vector[2..].iter().all(|&v| v == 0.0));
}
