use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = chainguard_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_product(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/products", base_url))
        .json(&json!({
            "id": id,
            "name": "Sample Product",
            "manufacturer": "ABC Manufacturing",
            "origin": "Factory A",
            "price": 9999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn update_status(
    client: &reqwest::Client,
    base_url: &str,
    id: &str,
    new_status: &str,
    acting_role: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/products/{}/status", base_url, id))
        .json(&json!({ "new_status": new_status, "acting_role": acting_role }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_available() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_product_returns_a_full_snapshot() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = create_product(&client, &srv.base_url, "PROD-1").await;

    assert_eq!(body["id"], "PROD-1");
    assert_eq!(body["current_status"], "manufactured");
    assert_eq!(body["next_status"], "packed");
    assert_eq!(body["paid"], false);
    assert_eq!(body["status_history"].as_array().unwrap().len(), 1);
    assert_eq!(body["status_history"][0]["status"], "manufactured");
    assert_eq!(body["status_history"][0]["updated_by"], "manufacturer");
    let hash = body["hash"].as_str().unwrap();
    assert_eq!(
        body["qr_payload"].as_str().unwrap(),
        format!("PROD-1:{hash}")
    );
}

#[tokio::test]
async fn ids_and_hashes_are_generated_when_omitted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({
            "name": "Sample Product",
            "manufacturer": "ABC Manufacturing",
            "origin": "Factory A",
            "price": 9999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();

    assert!(body["id"].as_str().unwrap().starts_with("PROD-"));
    assert!(body["hash"].as_str().unwrap().starts_with("hash-"));
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_product(&client, &srv.base_url, "PROD-1").await;

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({
            "id": "PROD-1",
            "name": "Another Product",
            "manufacturer": "ABC Manufacturing",
            "origin": "Factory B",
            "price": 100,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_id");
}

#[tokio::test]
async fn status_updates_enforce_role_permission() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "PROD-1").await;

    // A manufacturer may pack, but never ship.
    let res = update_status(&client, &srv.base_url, "PROD-1", "shipped", "manufacturer").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = update_status(&client, &srv.base_url, "PROD-1", "packed", "manufacturer").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["current_status"], "packed");
    assert_eq!(body["status_history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn skipping_a_status_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "PROD-1").await;

    // Logistics is allowed to ship, but not from `manufactured`.
    let res = update_status(&client, &srv.base_url, "PROD-1", "shipped", "logistics").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_transition");

    // State is unchanged.
    let res = client
        .get(format!("{}/products/PROD-1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["current_status"], "manufactured");
}

#[tokio::test]
async fn delivery_requires_payment_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "PROD-1").await;

    for status in ["packed", "shipped", "out_for_delivery"] {
        let res = update_status(&client, &srv.base_url, "PROD-1", status, "logistics").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Unpaid delivery confirmation is refused.
    let res = update_status(&client, &srv.base_url, "PROD-1", "delivered", "consumer").await;
    assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);

    // Pay, then confirm delivery.
    let res = client
        .post(format!("{}/products/PROD-1/pay", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["paid"], true);

    let res = update_status(&client, &srv.base_url, "PROD-1", "delivered", "consumer").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["current_status"], "delivered");
    assert_eq!(body["next_status"], serde_json::Value::Null);
    assert_eq!(body["status_history"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn paying_twice_is_harmless() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "PROD-1").await;

    for _ in 0..2 {
        let res = client
            .post(format!("{}/products/PROD-1/pay", srv.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["paid"], true);
    }
}

#[tokio::test]
async fn unknown_products_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/products/UNKNOWN-ID", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = update_status(&client, &srv.base_url, "UNKNOWN-ID", "packed", "manufacturer").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/products/UNKNOWN-ID/pay", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_returns_products_in_creation_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_product(&client, &srv.base_url, "PROD-1").await;
    create_product(&client, &srv.base_url, "PROD-2").await;

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "PROD-1");
    assert_eq!(items[1]["id"], "PROD-2");
}

#[tokio::test]
async fn role_selection_round_trips() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/role", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "manufacturer");

    let res = client
        .put(format!("{}/role", srv.base_url))
        .json(&json!({ "role": "logistics" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/role", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "logistics");
}

#[tokio::test]
async fn unknown_status_values_are_a_client_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    create_product(&client, &srv.base_url, "PROD-1").await;

    let res = update_status(&client, &srv.base_url, "PROD-1", "returned", "logistics").await;
    assert!(res.status().is_client_error());
}
