//! Full pipeline test: train on a small synthetic dataset, persist the
//! bundle, then serve predictions through the adapter and check the response
//! contract the host application depends on.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use estimator_core::adapter::handle_request;
use estimator_core::bundle::ArtifactBundle;
use estimator_core::config::EstimatorConfig;
use estimator_core::predictor::Predictor;
use estimator_core::trainer::run_training;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "evento-e2e-{}-{}",
        tag,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    ))
}

/// Synthetic dataset with a learnable cost structure: cost scales with guest
/// count and event type.
fn write_dataset(dir: &PathBuf) -> PathBuf {
    std::fs::create_dir_all(dir).expect("dataset dir");
    let mut csv = String::from(
        "tipo_evento,invitados,presupuesto,lugar,horario,comida,musica,decoracion,costo_real\n",
    );
    let types = [("boda", 450.0), ("fiesta", 180.0), ("conferencia", 300.0)];
    let venues = ["salon", "jardin", "auditorio"];
    for i in 0..60 {
        let (event_type, per_guest) = types[i % types.len()];
        let venue = venues[(i / 3) % venues.len()];
        let guests = 20.0 + (i as f64) * 4.0;
        let cost = per_guest * guests + 5000.0;
        let budget = cost * if i % 2 == 0 { 1.1 } else { 0.9 };
        csv.push_str(&format!(
            "{},{},{:.0},{},noche,bufet,dj,floral,{:.0}\n",
            event_type, guests, budget, venue, cost
        ));
    }
    let path = dir.join("dataset.csv");
    std::fs::write(&path, csv).expect("write dataset");
    path
}

fn trained_config(tag: &str) -> (EstimatorConfig, PathBuf) {
    let root = temp_dir(tag);
    let dataset_path = write_dataset(&root);
    let config = EstimatorConfig {
        artifact_dir: root.join("artifacts"),
        dataset_path,
    };
    run_training(&config).expect("training run");
    (config, root)
}

#[test]
fn train_then_predict_round_trip() {
    let (config, root) = trained_config("roundtrip");

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let raw = r#"{"nombre":"Ana","tipo_evento":"boda","invitados":100,"presupuesto":50000,
        "lugar":"salon","horario":"noche","comida":"bufet","musica":"dj","decoracion":"floral"}"#;
    let (payload, code) = handle_request(Some(raw), &bundle);

    assert_eq!(code, 0);
    assert!(payload.prediccion.is_finite());
    assert_eq!(payload.presupuesto_suficiente, payload.prediccion <= 50000.0);
    assert!((payload.diferencia - (payload.prediccion - 50000.0).abs()).abs() < 1e-9);
    assert!(payload.msg.contains("Ana"));
    assert!(payload.recomendacion.contains("Costo estimado"));

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn reloaded_bundle_predicts_identically() {
    let (config, root) = trained_config("stability");

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let predictor_a = Predictor::open(&bundle).expect("open a");
    let predictor_b = Predictor::open(&bundle).expect("open b");

    let query = estimator_core::predictor::EventQuery {
        name: "Luis".to_string(),
        record: encoding::EventRecord {
            event_type: "fiesta".to_string(),
            venue: "jardin".to_string(),
            schedule_slot: "noche".to_string(),
            catering: "bufet".to_string(),
            music: "dj".to_string(),
            decor: "floral".to_string(),
            guest_count: 80.0,
            budget: 30000.0,
        },
    };
    let a = predictor_a.predict_one(&query).expect("predict a");
    let b = predictor_b.predict_one(&query).expect("predict b");
    assert_eq!(a, b);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn training_learns_the_guest_count_gradient() {
    let (config, root) = trained_config("gradient");

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let predictor = Predictor::open(&bundle).expect("open");

    let query = |guests: f64| estimator_core::predictor::EventQuery {
        name: "Eva".to_string(),
        record: encoding::EventRecord {
            event_type: "boda".to_string(),
            venue: "salon".to_string(),
            schedule_slot: "noche".to_string(),
            catering: "bufet".to_string(),
            music: "dj".to_string(),
            decor: "floral".to_string(),
            guest_count: guests,
            budget: 50000.0,
        },
    };
    let small = predictor.predict_one(&query(30.0)).expect("small");
    let large = predictor.predict_one(&query(240.0)).expect("large");
    assert!(
        large.predicted_cost > small.predicted_cost,
        "more guests should cost more: {} vs {}",
        small.predicted_cost,
        large.predicted_cost
    );

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn missing_optional_fields_still_produce_a_payload() {
    let (config, root) = trained_config("lenient");

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let (payload, code) = handle_request(Some(r#"{"nombre":"Ana"}"#), &bundle);
    assert_eq!(code, 0);
    assert!(payload.prediccion.is_finite());
    // Budget defaulted to zero, so any positive prediction is insufficient.
    assert_eq!(payload.presupuesto_suficiente, payload.prediccion <= 0.0);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn malformed_json_yields_the_fixed_error_payload() {
    let (config, root) = trained_config("malformed");

    let bundle = ArtifactBundle::new(&config.artifact_dir);
    let (payload, code) = handle_request(Some("not json"), &bundle);
    assert_eq!(code, 1);
    assert_eq!(payload.prediccion, 0.0);
    assert!(!payload.presupuesto_suficiente);
    assert_eq!(payload.diferencia, 0.0);

    // The payload must stay parseable JSON with all five keys.
    let value: serde_json::Value = serde_json::from_str(&payload.to_json()).expect("json");
    assert_eq!(value.as_object().expect("object").len(), 5);

    let _ = std::fs::remove_dir_all(root);
}
