//! Router-level tests against an in-memory SQLite store

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pricecheck_server::db::{create_pool, schema, seed, DatabaseUrl};
use pricecheck_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app(seeded: bool) -> Router {
    let url = DatabaseUrl::parse("sqlite::memory:").unwrap();
    let pool = create_pool(&url).await.unwrap();
    schema::initialize(&pool, url.backend()).await.unwrap();
    if seeded {
        seed::seed_if_empty(&pool).await.unwrap();
    }
    build_router(AppState::new(pool))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: &Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

async fn post_raw(app: &Router, body: impl Into<Body>) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/product")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn index_and_health() {
    let app = app(false).await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["products"], 0);
}

#[tokio::test]
async fn search_by_barcode_returns_one_view_with_forecast() {
    let app = app(true).await;

    let (status, body) = get(&app, "/api/search?q=75007614").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "codigo": "75007614",
            "nombre": "Coca-Cola 600ml",
            "precios": [
                {"tienda": "Walmart", "precio": 20.0},
                {"tienda": "Chedraui", "precio": 18.0},
                {"tienda": "Soriana", "precio": 19.5}
            ],
            "forecast": {"predicted_price": 20.0, "change_abs": 0.83, "change_pct": 4.35}
        }])
    );
}

#[tokio::test]
async fn search_by_name_is_case_insensitive() {
    let app = app(true).await;

    let (status, body) = get(&app, "/api/search?q=%20BiMbO%20").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "Pan Blanco Bimbo 620g",
            "Pan Bimbo integral 620g",
            "Pan tostado Bimbo clásico 210g"
        ]
    );
}

#[tokio::test]
async fn search_folds_accented_capitals() {
    let app = app(false).await;

    let (status, _) = post_json(
        &app,
        json!({
            "codigo": "7501000123456",
            "nombre": "AZÚCAR ESTÁNDAR 1KG",
            "precio_walmart": 30,
            "precio_chedraui": 29.5,
            "precio_soriana": 31
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // azúcar, AZÚCAR, Estándar, 1kg
    for q in ["az%C3%BAcar", "AZ%C3%9ACAR", "Est%C3%A1ndar", "1kg"] {
        let (status, body) = get(&app, &format!("/api/search?q={q}")).await;
        assert_eq!(status, StatusCode::OK, "q={q}");
        assert_eq!(body[0]["nombre"], "AZÚCAR ESTÁNDAR 1KG");
    }
}

#[tokio::test]
async fn blank_or_missing_query_is_400() {
    let app = app(true).await;

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn no_match_is_404_not_empty_array() {
    let app = app(true).await;

    let (status, body) = get(&app, "/api/search?q=tortillas").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
    assert!(!body.is_array());
}

#[tokio::test]
async fn create_then_search_returns_inserted_values() {
    let app = app(false).await;

    let (status, body) = post_json(
        &app,
        json!({
            "codigo": "7501234567890",
            "nombre": "Tortillas de Maíz 1kg",
            "precio_walmart": 0,
            "precio_chedraui": 0,
            "precio_soriana": 0,
            "predicted_price_next_year": 5
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].as_str().unwrap().contains("7501234567890"));

    let (status, body) = get(&app, "/api/search?q=7501234567890").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["nombre"], "Tortillas de Maíz 1kg");
    assert_eq!(
        body[0]["forecast"],
        json!({"predicted_price": 5.0, "change_abs": 5.0, "change_pct": "not applicable"})
    );
}

#[tokio::test]
async fn update_existing_keeps_unspecified_fields() {
    let app = app(true).await;

    let (status, _) = post_json(
        &app,
        json!({"codigo": "7501020565935", "precio_walmart": "38.50", "precio_soriana": "n/a"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/search?q=7501020565935").await;
    let product = &body[0];
    assert_eq!(product["nombre"], "Leche Lala 1L Entera");
    assert_eq!(product["precios"][0]["precio"], 38.5);
    assert_eq!(product["precios"][1]["precio"], 31.0);
    assert_eq!(product["precios"][2]["precio"], 32.9);
    assert_eq!(product["forecast"]["predicted_price"], 35.0);
}

#[tokio::test]
async fn update_cannot_touch_id_or_codigo() {
    let app = app(true).await;

    let (status, _) = post_json(&app, json!({"codigo": "75007614", "id": 999})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/search?q=75007614").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["codigo"], "75007614");
    assert!(body[0].get("id").is_none());
}

#[tokio::test]
async fn missing_codigo_is_400() {
    let app = app(false).await;

    let (status, body) = post_json(&app, json!({"nombre": "X"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field 'codigo' is required");
}

#[tokio::test]
async fn malformed_bodies_are_400() {
    let app = app(false).await;

    for raw in ["", "not json", "{}", "[1,2,3]"] {
        let (status, body) = post_raw(&app, raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw:?}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn creating_without_prices_is_400_and_stores_nothing() {
    let app = app(false).await;

    let (status, body) = post_json(&app, json!({"codigo": "123", "nombre": "Sin precio"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field 'precio_walmart' is required");

    let (status, _) = get(&app, "/api/search?q=123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_failure_is_500_with_details() {
    // No schema: every query fails
    let url = DatabaseUrl::parse("sqlite::memory:").unwrap();
    let pool = create_pool(&url).await.unwrap();
    let app = build_router(AppState::new(pool));

    let (status, body) = get(&app, "/api/search?q=leche").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal server error");
    assert!(body["details"].as_str().unwrap().contains("products"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app(false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_posts_on_file_store_never_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.db");
    let url = DatabaseUrl::parse(&format!("sqlite://{}", path.display())).unwrap();
    let pool = create_pool(&url).await.unwrap();
    schema::initialize(&pool, url.backend()).await.unwrap();
    let app = build_router(AppState::new(pool));

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..40 {
        let app = app.clone();
        tasks.spawn(async move {
            let body = json!({
                "codigo": format!("750100000000{}", i % 4),
                "nombre": format!("Producto {}", i % 4),
                "precio_walmart": 10 + i,
                "precio_chedraui": 11,
                "precio_soriana": 12
            });
            post_json(&app, body).await
        });
    }

    let mut created = 0;
    while let Some(joined) = tasks.join_next().await {
        let (status, body) = joined.unwrap();
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::OK => {}
            other => panic!("unexpected {other}: {body}"),
        }
    }
    assert_eq!(created, 4);

    for n in 0..4 {
        let (status, body) = get(&app, &format!("/api/search?q=750100000000{n}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
