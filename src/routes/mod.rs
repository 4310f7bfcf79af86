//! HTTP surface: HTML pages, the JSON API and operational endpoints

pub mod catalog;
pub mod error;
pub mod health;
pub mod list_items;
pub mod lists;
pub mod pages;
pub mod users;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // HTML pages
        .route("/", get(pages::homepage))
        .route("/users/add", post(pages::add_user_form))
        .route("/users/{user_id}/delete", post(pages::delete_user_form))
        .route("/users/{user_id}/lists/view", get(pages::view_user_lists))
        .route("/users/{user_id}/lists/add", post(pages::create_list_form))
        .route(
            "/users/{user_id}/lists/{list_id}/delete",
            post(pages::delete_user_list_form),
        )
        .route("/lists/{list_id}/view", get(pages::view_list_detail))
        .route("/lists/{list_id}/delete", post(pages::delete_list_form))
        .route(
            "/lists/{list_id}/items/add",
            get(pages::show_add_item_form).post(pages::add_item_to_list_form),
        )
        .route(
            "/list_items/{list_item_id}/delete/",
            post(pages::delete_item_form),
        )
        .route(
            "/items/new",
            get(pages::new_item_form).post(pages::create_item_form),
        )
        // JSON API
        .route("/users/", get(users::list_users).post(users::create_user))
        .route(
            "/categories/",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route("/items/", get(catalog::list_items).post(catalog::create_item))
        .route("/lists/", get(lists::list_all).post(lists::create_list))
        .route("/users/{user_id}/lists/", get(lists::user_lists))
        .route(
            "/lists/{list_id}",
            get(lists::get_list).delete(lists::delete_list),
        )
        .route(
            "/lists/{list_id}/items/",
            get(lists::list_items_in_list).post(lists::add_item),
        )
        .route(
            "/list_items/{list_item_id}/quantity/",
            put(list_items::update_quantity),
        )
        .route(
            "/list_items/{list_item_id}/purchased/",
            put(list_items::mark_purchased).post(pages::mark_item_purchased_form),
        )
        .route("/list_items/{list_item_id}/", delete(list_items::delete_item))
        // Operational endpoints
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::test_database;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use std::time::Instant;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let state = Arc::new(AppState {
            config: Config::in_memory(),
            db: test_database().await,
            start_time: Instant::now(),
        });
        build_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    /// amy / Dairy / Milk / Groceries, all with ID 1
    async fn seed(app: &Router) {
        for (uri, body) in [
            ("/users/", json!({ "username": "amy", "email": "a@x.com" })),
            ("/categories/", json!({ "category_name": "Dairy" })),
            (
                "/items/",
                json!({ "item_name": "Milk", "category_id": 1, "unit": "L" }),
            ),
            ("/lists/", json!({ "user_id": 1, "list_name": "Groceries" })),
        ] {
            let response = send(app, json_request("POST", uri, body)).await;
            assert_eq!(response.status(), StatusCode::OK, "POST {uri}");
        }
    }

    #[tokio::test]
    async fn test_live_and_health() {
        let app = test_app().await;

        let response = send(&app, get_request("/live")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_request("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let health = body_json(response).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["database"], true);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = test_app().await;
        send(&app, get_request("/users/")).await;

        let response = send(&app, get_request("/metrics")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;
        assert!(text.contains("shopping_list_store_connections_total"));
    }

    #[tokio::test]
    async fn test_json_scenario() {
        let app = test_app().await;
        seed(&app).await;

        let response = send(
            &app,
            json_request("POST", "/lists/1/items/", json!({ "item_id": 1, "quantity": 2 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let ack = body_json(response).await;
        assert_eq!(ack["success"], true);
        assert_eq!(ack["message"], "Item added to list.");

        let response = send(&app, get_request("/lists/1/items/")).await;
        let rows = body_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        let row = &rows[0];
        assert_eq!(row["item_name"], "Milk");
        assert_eq!(row["category_name"], "Dairy");
        assert_eq!(row["unit"], "L");
        assert_eq!(row["quantity"], 2.0);
        assert_eq!(row["is_purchased"], false);
    }

    #[tokio::test]
    async fn test_list_item_updates() {
        let app = test_app().await;
        seed(&app).await;
        send(
            &app,
            json_request("POST", "/lists/1/items/", json!({ "item_id": 1, "quantity": 1 })),
        )
        .await;

        let response = send(
            &app,
            json_request("PUT", "/list_items/1/quantity/", json!({ "new_quantity": 4.5 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            json_request("PUT", "/list_items/1/purchased/", json!({ "is_purchased": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let rows = body_json(send(&app, get_request("/lists/1/items/")).await).await;
        assert_eq!(rows[0]["quantity"], 4.5);
        assert_eq!(rows[0]["is_purchased"], true);

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/list_items/1/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let rows = body_json(send(&app, get_request("/lists/1/items/")).await).await;
        assert!(rows.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_map_to_fixed_messages() {
        let app = test_app().await;
        seed(&app).await;

        let response = send(
            &app,
            json_request("POST", "/users/", json!({ "username": "amy", "email": "b@x.com" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Username already exists or error occurred." })
        );

        let response = send(
            &app,
            json_request("POST", "/lists/1/items/", json!({ "item_id": 1, "quantity": -3 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/list_items/42/")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Failed to delete item." })
        );

        let response = send(&app, get_request("/lists/9")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_endpoints() {
        let app = test_app().await;
        seed(&app).await;

        let lists = body_json(send(&app, get_request("/users/1/lists/")).await).await;
        assert_eq!(lists[0]["list_name"], "Groceries");

        let list = body_json(send(&app, get_request("/lists/1")).await).await;
        assert_eq!(list["user_id"], 1);

        let all = body_json(send(&app, get_request("/lists/")).await).await;
        assert_eq!(all.as_array().unwrap().len(), 1);

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/lists/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/lists/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_homepage_lists_users() {
        let app = test_app().await;
        seed(&app).await;

        let response = send(&app, get_request("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("amy"));
        assert!(html.contains("/users/1/lists/view"));
    }

    #[tokio::test]
    async fn test_html_flow() {
        let app = test_app().await;

        let response = send(&app, form_request("/users/add", "username=amy&email=a%40x.com")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        send(
            &app,
            json_request("POST", "/categories/", json!({ "category_name": "Dairy" })),
        )
        .await;
        let response = send(
            &app,
            form_request("/items/new", "item_name=Milk&unit=L&category_id=1"),
        )
        .await;
        assert_eq!(location(&response), "/items/new");

        let response = send(&app, form_request("/users/1/lists/add", "list_name=Groceries")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/users/1/lists/view");

        let response = send(&app, get_request("/users/1/lists/view")).await;
        assert!(body_text(response).await.contains("Groceries"));

        let response = send(&app, get_request("/lists/1/items/add")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Milk"));

        let response = send(&app, form_request("/lists/1/items/add", "item_id=1&quantity=2")).await;
        assert_eq!(location(&response), "/lists/1/view");

        let response = send(
            &app,
            form_request("/list_items/1/purchased/", "is_purchased=true"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/lists/1/view");

        let response = send(&app, get_request("/lists/1/view")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Milk"));
        assert!(html.contains("Dairy"));
        assert!(html.contains(r#"class="purchased""#));

        let response = send(&app, form_request("/list_items/1/delete/", "")).await;
        assert_eq!(location(&response), "/lists/1/view");

        let response = send(&app, form_request("/list_items/1/delete/", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_form_cascades() {
        let app = test_app().await;
        seed(&app).await;
        send(
            &app,
            json_request("POST", "/lists/1/items/", json!({ "item_id": 1, "quantity": 2 })),
        )
        .await;

        let response = send(&app, form_request("/users/1/delete", "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let lists = body_json(send(&app, get_request("/users/1/lists/")).await).await;
        assert!(lists.as_array().unwrap().is_empty());
        let items = body_json(send(&app, get_request("/lists/1/items/")).await).await;
        assert!(items.as_array().unwrap().is_empty());

        let response = send(&app, get_request("/users/1/lists/view")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, form_request("/users/1/delete", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_pages_are_not_found() {
        let app = test_app().await;

        assert_eq!(
            send(&app, get_request("/users/5/lists/view")).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&app, get_request("/lists/5/view")).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&app, get_request("/lists/5/items/add")).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
