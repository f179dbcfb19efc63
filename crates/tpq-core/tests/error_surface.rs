use tpq_core::errors::{ErrorInfo, TpqError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("sector", "Sz=-2")
        .with_context("path", "run/Sz=-2")
}

#[test]
fn config_error_surface() {
    let err = TpqError::Config(sample_info("empty-sector", "sector has no samples"));
    assert_eq!(err.info().code, "empty-sector");
    assert!(err.info().context.contains_key("sector"));
}

#[test]
fn data_error_surface() {
    let err = TpqError::Data(sample_info("ladder-mismatch", "beta ladder differs"));
    assert_eq!(err.info().code, "ladder-mismatch");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn numeric_error_surface() {
    let err = TpqError::Numeric(sample_info("denom-nonfinite", "partition sum overflowed"));
    assert_eq!(err.info().code, "denom-nonfinite");
}

#[test]
fn rng_error_surface() {
    let err = TpqError::Rng(sample_info("invalid-seed", "seed rejected"));
    assert_eq!(err.info().code, "invalid-seed");
}

#[test]
fn serde_error_surface() {
    let err = TpqError::Serde(sample_info("result-write", "write failed"));
    assert_eq!(err.info().code, "result-write");
}

#[test]
fn display_includes_context_and_hint() {
    let err = TpqError::Config(
        ErrorInfo::new("empty-sector", "sector has no samples")
            .with_context("sector", "Sz=0")
            .with_hint("check that the sampler wrote sample_*.json files"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("empty-sector"));
    assert!(rendered.contains("sector=Sz=0"));
    assert!(rendered.contains("hint"));
}
