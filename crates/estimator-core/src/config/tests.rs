use super::*;

#[test]
fn cli_argument_wins_over_defaults() {
    let cfg = EstimatorConfig::resolve(Some("/tmp/data.csv"), Some("/tmp/arts"));
    assert_eq!(cfg.dataset_path, PathBuf::from("/tmp/data.csv"));
    assert_eq!(cfg.artifact_dir, PathBuf::from("/tmp/arts"));
}

#[test]
fn blank_cli_argument_falls_through() {
    let cfg = EstimatorConfig::resolve(Some("   "), None);
    // Either the env var (if the harness sets one) or the built-in default;
    // never the blank CLI value.
    assert!(!cfg.dataset_path.as_os_str().is_empty());
    assert_ne!(cfg.dataset_path, PathBuf::from("   "));
}

#[test]
fn defaults_apply_when_nothing_is_given() {
    // Env vars are process-global; only assert the fallback when unset.
    if std::env::var(ARTIFACT_DIR_ENV).is_err() && std::env::var(DATASET_ENV).is_err() {
        let cfg = EstimatorConfig::resolve(None, None);
        assert_eq!(cfg.artifact_dir, PathBuf::from("artifacts"));
        assert_eq!(cfg.dataset_path, PathBuf::from("dataset.csv"));
    }
}
