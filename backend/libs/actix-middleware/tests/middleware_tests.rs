use actix_middleware::{
    authenticated_user, AuthFailure, CorrelationIdMiddleware, JwtAuthMiddleware, JwtKeys,
    ACCESS_TOKEN_COOKIE, CORRELATION_ID_HEADER,
};
use actix_web::cookie::Cookie;
use actix_web::{test, web, App, HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

async fn whoami(req: HttpRequest) -> HttpResponse {
    match authenticated_user(&req) {
        Ok(user) => HttpResponse::Ok().body(user.0.to_string()),
        Err(AuthFailure::MissingToken) => HttpResponse::Unauthorized().body("missing"),
        Err(AuthFailure::InvalidToken(_)) => HttpResponse::Unauthorized().body("invalid"),
    }
}

fn keys() -> Arc<JwtKeys> {
    Arc::new(JwtKeys::from_secret(b"middleware-test-secret"))
}

#[actix_web::test]
async fn bearer_token_sets_user_id() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id, "alice", 600).unwrap();

    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware::new(keys.clone()))
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, user_id.to_string().as_bytes());
}

#[actix_web::test]
async fn cookie_token_sets_user_id() {
    let keys = keys();
    let user_id = Uuid::new_v4();
    let token = keys.issue(user_id, "bob", 600).unwrap();

    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware::new(keys.clone()))
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, token))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, user_id.to_string().as_bytes());
}

#[actix_web::test]
async fn missing_and_invalid_tokens_pass_through() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuthMiddleware::new(keys()))
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get().uri("/me").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "missing".as_bytes());

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "invalid".as_bytes());
}

#[actix_web::test]
async fn correlation_id_is_echoed_or_generated() {
    let app = test::init_service(
        App::new()
            .wrap(CorrelationIdMiddleware)
            .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header((CORRELATION_ID_HEADER, "trace-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(CORRELATION_ID_HEADER).unwrap(),
        "trace-123"
    );

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp
        .headers()
        .get(CORRELATION_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}
