/// Liveness and readiness probes
use crate::response::ApiResponse;
use crate::{AppState, SERVICE_NAME};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Process is up and serving requests
pub async fn healthcheck() -> HttpResponse {
    ApiResponse::new(StatusCode::OK, json!({ "status": "ok" }), "Health check passed").respond()
}

/// Ready when a pooled connection can run `SELECT 1`
pub async fn readiness(state: web::Data<AppState>) -> HttpResponse {
    let check = async {
        let mut conn = db_pool::acquire_with_metrics(&state.db, SERVICE_NAME).await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok::<_, sqlx::Error>(())
    };

    match check.await {
        Ok(()) => ApiResponse::new(
            StatusCode::OK,
            json!({ "status": "ready", "database": "ok" }),
            "Service is ready",
        )
        .respond(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            ApiResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "status": "unavailable", "database": "unreachable" }),
                "Service is not ready",
            )
            .respond()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_healthcheck_envelope() {
        let resp = healthcheck().await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["data"]["status"], "ok");
        assert_eq!(value["success"], true);
    }
}
