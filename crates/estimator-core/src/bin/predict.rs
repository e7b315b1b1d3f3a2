//! Inference entry point. Invoked by the host application as a subprocess with
//! one positional argument holding the request JSON. Stdout carries exactly
//! one JSON object; all diagnostics go to stderr.

use estimator_core::adapter::handle_request;
use estimator_core::bundle::ArtifactBundle;
use estimator_core::config::EstimatorConfig;

fn main() {
    // Stdout is the response channel; the subscriber must not touch it.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args().nth(1);
    let config = EstimatorConfig::resolve(None, None);
    let bundle = ArtifactBundle::new(&config.artifact_dir);

    let (payload, code) = handle_request(arg.as_deref(), &bundle);
    println!("{}", payload.to_json());
    std::process::exit(code);
}
