use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bhatti_client::{spawn_admin_watcher, spawn_customer_watcher, ApiClient, ClientError, WatchConfig, WatchEvent};
use bhatti_core::domain::{OrderItemRequest, OrderStatus, PlaceOrder};

fn fast_config() -> WatchConfig {
    WatchConfig {
        interval: Duration::from_millis(50),
        initial_delay: Duration::ZERO,
    }
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(2)).with_token("tok")
}

#[tokio::test]
async fn test_admin_watcher_emits_new_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "a", "orderNumber": "#000"}])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "b", "orderNumber": "#001"},
            {"_id": "a", "orderNumber": "#000"}
        ])))
        .mount(&server)
        .await;

    let handle = spawn_admin_watcher(client(&server), fast_config());
    let mut events = handle.subscribe();

    let event = timeout(Duration::from_secs(3), events.recv()).await.unwrap().unwrap();
    assert_eq!(
        event,
        WatchEvent::NewOrder { order_id: "b".into(), order_number: Some("#001".into()) }
    );

    timeout(Duration::from_secs(3), handle.shutdown()).await.unwrap();
}

#[tokio::test]
async fn test_customer_watcher_reports_status_change() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "a", "status": "Pending"}])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "n", "status": "Pending"},
            {"_id": "a", "status": "In Kitchen"}
        ])))
        .mount(&server)
        .await;

    let handle = spawn_customer_watcher(client(&server), fast_config());
    let mut events = handle.subscribe();

    let event = timeout(Duration::from_secs(3), events.recv()).await.unwrap().unwrap();
    assert_eq!(
        event,
        WatchEvent::StatusChanged {
            order_id: "a".into(),
            order_number: None,
            previous: OrderStatus::Pending,
            current: OrderStatus::InKitchen,
        }
    );

    timeout(Duration::from_secs(3), handle.shutdown()).await.unwrap();
}

#[tokio::test]
async fn test_shutdown_during_initial_delay() {
    let server = MockServer::start().await;
    let config = WatchConfig {
        interval: Duration::from_secs(60),
        initial_delay: Duration::from_secs(60),
    };
    let handle = spawn_customer_watcher(client(&server), config);
    timeout(Duration::from_secs(1), handle.shutdown()).await.unwrap();
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_api_error_body_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "Admins should use admin orders endpoint"})),
        )
        .mount(&server)
        .await;

    let request = PlaceOrder {
        items: vec![OrderItemRequest { menu_item_id: "m1".into(), qty: 1, note: None }],
        address: "Lakeside".into(),
        phone: "9800000000".into(),
        location: None,
    };
    let err = client(&server).place_order(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    match err {
        ClientError::Api { message, .. } => assert_eq!(message, "Admins should use admin orders endpoint"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_menu_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/menu"))
        .and(query_param("q", "chicken momo"))
        .and(query_param("category", "Momo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "m1",
            "title": "Chicken Momo",
            "description": "Steamed",
            "price": 180.0,
            "category": "Momo",
            "imageUrl": "/momo.jpg",
            "isAvailable": true,
            "rating": 4.5
        }])))
        .mount(&server)
        .await;

    let items = ApiClient::new(server.uri(), Duration::from_secs(2))
        .menu(Some("chicken momo"), Some("Momo"))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Chicken Momo");
}
