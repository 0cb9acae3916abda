use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bhatti_api::{build_router, AppState, Repositories};
use bhatti_core::domain::MenuItem;
use bhatti_core::events::EventBus;
use bhatti_core::repositories::MenuRepository;
use bhatti_infrastructure::MemoryStore;
use bhatti_security::JwtService;

const OWNER_UID: &str = "owner-uid";

struct TestApp {
    router: Router,
    jwt: Arc<JwtService>,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_visit_limit(100)
    }

    fn with_visit_limit(visit_per_second: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        let repos = Repositories {
            menu: store.clone(),
            orders: store.clone(),
            offers: store.clone(),
            profiles: store.clone(),
            metrics: store.clone(),
        };
        let admins = vec![OWNER_UID.to_string()];
        let jwt = Arc::new(JwtService::new("test-secret".into(), 3600, None, admins.clone()));
        let state = AppState::new(
            repos,
            Arc::new(EventBus::default()),
            jwt.clone(),
            admins,
            visit_per_second,
        );
        Self {
            router: build_router(state, Duration::from_secs(5)),
            jwt,
            store,
        }
    }

    fn customer_token(&self) -> String {
        self.jwt.issue_token("cust-1", Some("sita@example.com"), None).unwrap()
    }

    fn admin_token(&self) -> String {
        self.jwt.issue_token(OWNER_UID, Some("owner@bhatti.np"), None).unwrap()
    }

    async fn seed_item(&self, id: &str, title: &str, price: f64) {
        let item = MenuItem {
            id: id.into(),
            title: title.into(),
            description: "House special".into(),
            price,
            category: "Momo".into(),
            image_url: "/momo.jpg".into(),
            is_available: true,
            rating: 4.5,
        };
        MenuRepository::insert(self.store.as_ref(), &item).await.unwrap();
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_public_menu_falls_back_when_store_empty() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items[0]["_id"].as_str().unwrap().starts_with("fallback-"));

    app.seed_item("m1", "Chicken Momo", 180.0).await;
    let (_, body) = app.call(Method::GET, "/api/menu?q=chicken", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["_id"], "m1");
}

#[tokio::test]
async fn test_orders_require_token() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app.call(Method::GET, "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_lifecycle() {
    let app = TestApp::new();
    app.seed_item("m1", "Chicken Momo", 180.0).await;
    app.seed_item("m2", "Coke", 100.0).await;
    let customer = app.customer_token();
    let admin = app.admin_token();

    let (status, created) = app
        .call(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({
                "items": [
                    {"menuItemId": "m1", "qty": 2, "note": "extra achar"},
                    {"menuItemId": "m2", "qty": 1},
                    {"menuItemId": "gone", "qty": 1}
                ],
                "address": "Lakeside, Pokhara",
                "phone": "9800000000",
                "location": {"lat": 28.21, "lng": 83.95}
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["orderNumber"], "#000");
    assert_eq!(created["total"], 460.0);
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["items"].as_array().unwrap().len(), 2);
    assert_eq!(created["items"][0]["menuItem"]["title"], "Chicken Momo");
    assert_eq!(created["user"]["name"], "sita@example.com");
    let order_id = created["_id"].as_str().unwrap().to_string();

    let (status, mine) = app.call(Method::GET, "/api/orders", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["_id"], order_id.as_str());
    assert!(mine[0].get("phone").is_none());

    let (status, all) = app.call(Method::GET, "/api/admin/orders?limit=5", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all[0]["phone"], "9800000000");
    assert_eq!(all[0]["location"]["lat"], 28.21);

    let (status, updated) = app
        .call(
            Method::PATCH,
            "/api/admin/orders",
            Some(&admin),
            Some(json!({"id": order_id, "status": "preparing"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "In Kitchen");

    let (status, body) = app
        .call(
            Method::PATCH,
            "/api/admin/orders",
            Some(&admin),
            Some(json!({"id": "missing", "status": "Delivered"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn test_place_order_rejections() {
    let app = TestApp::new();
    let customer = app.customer_token();

    let (status, body) = app
        .call(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({"items": [], "address": "Lakeside", "phone": "98"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "At least one item is required");

    let (status, body) = app
        .call(
            Method::POST,
            "/api/orders",
            Some(&customer),
            Some(json!({"items": [{"menuItemId": "fallback-1", "qty": 1}], "address": "Lakeside", "phone": "98"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["invalidItems"], json!(["fallback-1"]));

    let admin = app.admin_token();
    let (status, body) = app
        .call(
            Method::POST,
            "/api/orders",
            Some(&admin),
            Some(json!({"items": [{"menuItemId": "m1", "qty": 1}], "address": "x", "phone": "y"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Admins should use admin orders endpoint");
}

#[tokio::test]
async fn test_admin_routes_reject_customers() {
    let app = TestApp::new();
    let customer = app.customer_token();
    for uri in ["/api/admin/orders", "/api/admin/menu", "/api/admin/metrics", "/api/admin/cleanup"] {
        let (status, _) = app.call(Method::GET, uri, Some(&customer), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }
    let (status, _) = app.call(Method::GET, "/api/admin/menu", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let role_admin = app.jwt.issue_token("someone", None, Some("admin")).unwrap();
    let (status, _) = app.call(Method::GET, "/api/admin/menu", Some(&role_admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_menu_crud() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .call(Method::POST, "/api/admin/menu", Some(&admin), Some(json!({"title": "Thukpa"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let (status, created) = app
        .call(
            Method::POST,
            "/api/admin/menu",
            Some(&admin),
            Some(json!({
                "title": "Thukpa",
                "description": "Noodle soup",
                "price": 220,
                "category": "Soup",
                "imageUrl": "/thukpa.jpg"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isAvailable"], true);
    assert_eq!(created["rating"], 4.5);
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = app
        .call(Method::PATCH, "/api/admin/menu", Some(&admin), Some(json!({"id": id})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No valid fields to update");

    let (status, updated) = app
        .call(
            Method::PATCH,
            "/api/admin/menu",
            Some(&admin),
            Some(json!({"id": id, "price": 250, "isAvailable": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 250.0);
    assert_eq!(updated["isAvailable"], false);

    let (status, body) = app
        .call(Method::DELETE, "/api/admin/menu", Some(&admin), Some(json!({"id": id})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Menu item deleted");

    let (status, body) = app
        .call(Method::DELETE, "/api/admin/menu", Some(&admin), Some(json!({"id": id})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Menu item not found");
}

#[tokio::test]
async fn test_offers_visible_when_live() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .call(Method::POST, "/api/admin/offers", Some(&admin), Some(json!({"title": "  "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");

    let (status, live) = app
        .call(
            Method::POST,
            "/api/admin/offers",
            Some(&admin),
            Some(json!({"title": "Momo Monday", "highlight": "2 for 1"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    app.call(
        Method::POST,
        "/api/admin/offers",
        Some(&admin),
        Some(json!({"title": "Expired", "validTo": "2020-01-01"})),
    )
    .await;

    let (status, public) = app.call(Method::GET, "/api/offers", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["_id"], live["_id"]);

    let (_, all) = app.call(Method::GET, "/api/admin/offers", Some(&admin), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, patched) = app
        .call(
            Method::PATCH,
            "/api/admin/offers",
            Some(&admin),
            Some(json!({"id": live["_id"], "isActive": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["isActive"], false);
    let (_, public) = app.call(Method::GET, "/api/offers", None, None).await;
    assert!(public.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_and_addresses() {
    let app = TestApp::new();
    let customer = app.customer_token();

    let (status, body) = app.call(Method::GET, "/api/profile", Some(&customer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, body) = app
        .call(Method::PUT, "/api/profile", Some(&customer), Some(json!({"name": "Sita"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and phone are required");

    let (status, profile) = app
        .call(
            Method::PUT,
            "/api/profile",
            Some(&customer),
            Some(json!({"name": "Sita", "phone": "9800000000"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "sita@example.com");

    let (status, book) = app
        .call(
            Method::POST,
            "/api/profile/addresses",
            Some(&customer),
            Some(json!({"address": "Lakeside"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let home = book["addresses"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(book["defaultAddressId"], home.as_str());
    assert_eq!(book["addresses"][0]["label"], "Saved address");

    let (_, book) = app
        .call(
            Method::POST,
            "/api/profile/addresses",
            Some(&customer),
            Some(json!({"label": "Office", "address": "Mahendrapul"})),
        )
        .await;
    let office = book["addresses"][1]["id"].as_str().unwrap().to_string();

    let (status, book) = app
        .call(
            Method::PATCH,
            "/api/profile/addresses",
            Some(&customer),
            Some(json!({"id": office, "makeDefault": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["defaultAddressId"], office.as_str());

    let (status, book) = app
        .call(
            Method::DELETE,
            "/api/profile/addresses",
            Some(&customer),
            Some(json!({"id": office})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["defaultAddressId"], home.as_str());

    let (_, profile) = app.call(Method::GET, "/api/profile", Some(&customer), None).await;
    assert_eq!(profile["name"], "Sita");
    assert_eq!(profile["address"], "Lakeside");
}

#[tokio::test]
async fn test_visit_counter_and_rate_limit() {
    let app = TestApp::with_visit_limit(1);
    let (status, body) = app.call(Method::POST, "/api/metrics/visit", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 1);

    let (status, body) = app.call(Method::POST, "/api/metrics/visit", None, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests");
}

#[tokio::test]
async fn test_admin_metrics_shapes() {
    let app = TestApp::new();
    app.seed_item("m1", "Chicken Momo", 180.0).await;
    let customer = app.customer_token();
    let admin = app.admin_token();
    app.call(
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(json!({"items": [{"menuItemId": "m1", "qty": 2}], "address": "Lakeside", "phone": "98"})),
    )
    .await;
    app.call(Method::POST, "/api/metrics/visit", None, None).await;

    let (status, metrics) = app.call(Method::GET, "/api/admin/metrics", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["orderMetrics"]["totalSales"], 360.0);
    assert_eq!(metrics["orderMetrics"]["pending"], 1);
    assert_eq!(metrics["orderMetrics"]["topItems"][0]["title"], "Chicken Momo");
    assert_eq!(metrics["sales"]["daily"]["labels"].as_array().unwrap().len(), 7);
    assert_eq!(metrics["sales"]["weekly"]["labels"].as_array().unwrap().len(), 6);

    let (status, insights) = app.call(Method::GET, "/api/admin/user-metrics", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(insights["activeCustomers24h"], 1);
    assert_eq!(insights["totalVisits"], 1);
    assert_eq!(insights["avgItemsPerOrder"], 2.0);
}

#[tokio::test]
async fn test_cleanup_guards_and_purge() {
    let app = TestApp::new();
    app.seed_item("m1", "Chicken Momo", 180.0).await;
    let admin = app.admin_token();

    let (status, stats) = app.call(Method::GET, "/api/admin/cleanup", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["collections"]["menuItems"], 1);
    assert_eq!(stats["collections"]["users_admin"], 0);

    let (status, body) = app
        .call(Method::DELETE, "/api/admin/cleanup?collection=menuItems", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Confirmation required. Add ?confirm=true to proceed.");

    let (status, _) = app
        .call(Method::DELETE, "/api/admin/cleanup?collection=users&confirm=true", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::DELETE, "/api/admin/cleanup?collection=carts&confirm=true", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid collection. Allowed: orders, menuItems, offers, metrics, users");

    let (status, report) = app
        .call(Method::DELETE, "/api/admin/cleanup?collection=menuItems&confirm=true", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["deleted"], 1);
    assert_eq!(report["collection"], "menuItems");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/admin/orders")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
