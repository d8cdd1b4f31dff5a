//! Prometheus metrics for vidtube-service.
//!
//! Collectors register in the default registry, so `/metrics` also exposes
//! the pool gauges from `db-pool` and the process collector.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Media uploads by kind (image/video) and outcome (ok/error)
    pub static ref MEDIA_UPLOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "vidtube_media_uploads_total",
        "Media uploads by kind and outcome",
        &["kind", "outcome"]
    )
    .expect("Prometheus metrics registration should succeed at startup");

    /// Like and subscription toggles by entity and resulting action
    pub static ref TOGGLES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "vidtube_toggles_total",
        "Like and subscription toggles",
        &["entity", "action"]
    )
    .expect("Prometheus metrics registration should succeed at startup");
}

pub fn record_upload(kind: &str, ok: bool) {
    MEDIA_UPLOADS_TOTAL
        .with_label_values(&[kind, if ok { "ok" } else { "error" }])
        .inc();
}

pub fn record_toggle(entity: &str, added: bool) {
    TOGGLES_TOTAL
        .with_label_values(&[entity, if added { "added" } else { "removed" }])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_metrics_include_recorded_counters() {
        record_toggle("like", true);
        record_upload("image", false);

        let resp = serve_metrics().await;
        assert!(resp.status().is_success());

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("vidtube_toggles_total"));
        assert!(text.contains("vidtube_media_uploads_total"));
    }
}
