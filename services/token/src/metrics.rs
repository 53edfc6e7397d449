//! Prometheus metrics for the issuer.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_int_counter, register_int_gauge, CounterVec, Encoder,
    IntCounter, IntGauge, TextEncoder,
};

/// Tokens issued, by kind (`active` or `expired`).
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "jwks_issuer_tokens_issued_total",
        "Total number of tokens issued",
        &["kind"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Failed issuance attempts, by error code.
pub static ISSUANCE_FAILURES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "jwks_issuer_issuance_failures_total",
        "Total number of failed token issuance attempts",
        &["code"]
    )
    .expect("Failed to register issuance_failures metric")
});

/// Signing keys generated.
pub static KEYS_GENERATED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "jwks_issuer_keys_generated_total",
        "Total number of signing keys generated"
    )
    .expect("Failed to register keys_generated metric")
});

/// Keys in the most recently published key set.
pub static PUBLISHED_KEYS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "jwks_issuer_published_keys",
        "Number of keys in the last published JWKS"
    )
    .expect("Failed to register published_keys metric")
});

pub fn record_token_issued(expired: bool) {
    let kind = if expired { "expired" } else { "active" };
    TOKENS_ISSUED.with_label_values(&[kind]).inc();
}

pub fn record_issuance_failure(code: &str) {
    ISSUANCE_FAILURES.with_label_values(&[code]).inc();
}

pub fn record_key_generated() {
    KEYS_GENERATED.inc();
}

pub fn set_published_keys(count: usize) {
    PUBLISHED_KEYS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

/// Renders every registered metric in the Prometheus text format.
///
/// # Errors
///
/// Returns the encoder error if a metric family fails to encode.
pub fn gather_text() -> Result<String, prometheus::Error> {
    // Touch the statics so they appear before their first observation.
    Lazy::force(&TOKENS_ISSUED);
    Lazy::force(&ISSUANCE_FAILURES);
    Lazy::force(&KEYS_GENERATED);
    Lazy::force(&PUBLISHED_KEYS);

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_counters_by_kind() {
        let before = TOKENS_ISSUED.with_label_values(&["expired"]).get();
        record_token_issued(true);
        let after = TOKENS_ISSUED.with_label_values(&["expired"]).get();
        assert!(after >= before + 1.0);
    }

    #[test]
    fn test_gather_text_lists_metrics() {
        record_key_generated();
        let text = gather_text().unwrap();
        assert!(text.contains("jwks_issuer_keys_generated_total"));
        assert!(text.contains("jwks_issuer_published_keys"));
    }
}
