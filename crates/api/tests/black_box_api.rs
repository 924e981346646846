use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{Method, StatusCode};
use sakila_api::app::build_app;
use sakila_api::app::services::AppServices;
use sakila_store::MemoryStore;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    store: Arc<MemoryStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, bound to an ephemeral port, over in-memory
    /// stores. The store handle lets tests seed fixture rows the API
    /// itself never writes.
    async fn spawn() -> Self {
        let (services, store) = AppServices::in_memory();
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn put_json(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let res = client.put(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

fn ts(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn film_create_applies_defaults() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (status, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "title": "Academy Dinosaur", "language_id": lang }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Film created successfully");
    let id = body["data"]["film_id"].as_i64().unwrap();

    let (status, body) = get_json(&client, server.url(&format!("/films/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let film = &body["data"];
    assert_eq!(film["title"], "Academy Dinosaur");
    assert_eq!(film["rating"], "G");
    assert_eq!(film["rental_duration"], 3);
    assert_eq!(film["rental_rate"].as_f64().unwrap(), 4.99);
    assert_eq!(film["replacement_cost"].as_f64().unwrap(), 19.99);
    assert_eq!(film["language_name"], "English");
}

#[tokio::test]
async fn film_create_without_title_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (status, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "language_id": lang }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The field 'title' is required");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn film_list_paginates() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    for n in 1..=12 {
        let (status, _) = post_json(
            &client,
            server.url("/films"),
            json!({ "title": format!("Film {n:02}"), "language_id": lang }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get_json(&client, server.url("/films?page=2&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    let films = body["data"]["films"].as_array().unwrap();
    assert_eq!(films.len(), 5);
    assert_eq!(films[0]["title"], "Film 06");
    assert_eq!(films[4]["title"], "Film 10");
    // Summaries expose the joined language name, not the raw id.
    assert_eq!(films[0]["language"], "English");

    let meta = &body["data"]["pagination"];
    assert_eq!(meta["current_page"], 2);
    assert_eq!(meta["total_pages"], 3);
    assert_eq!(meta["total_items"], 12);
    assert_eq!(meta["items_per_page"], 5);
}

#[tokio::test]
async fn film_search_skips_pagination() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    for title in ["Alien Center", "Agent Truman", "Airport Pollock"] {
        post_json(
            &client,
            server.url("/films"),
            json!({ "title": title, "language_id": lang }),
        )
        .await;
    }

    let (status, body) = get_json(&client, server.url("/films?search=agent&page=5&limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Search results for: agent");
    let films = body["data"]["films"].as_array().unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["title"], "Agent Truman");
    assert!(body["data"].get("pagination").is_none());
}

#[tokio::test]
async fn film_update_merges_partial_body() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "title": "Before", "language_id": lang, "length": 90 }),
    )
    .await;
    let id = body["data"]["film_id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/films/{id}")),
        json!({ "rental_rate": 2.99 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let film = &body["data"];
    assert_eq!(film["rental_rate"].as_f64().unwrap(), 2.99);
    assert_eq!(film["title"], "Before");
    assert_eq!(film["length"], 90);
}

#[tokio::test]
async fn film_update_with_empty_body_leaves_the_record_unchanged() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "title": "Solo", "language_id": lang }),
    )
    .await;
    let id = body["data"]["film_id"].as_i64().unwrap();

    let (status, body) = put_json(&client, server.url(&format!("/films/{id}")), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Film updated successfully");
    assert_eq!(body["data"]["title"], "Solo");
    assert_eq!(body["data"]["rating"], "G");
}

#[tokio::test]
async fn film_input_is_sanitized() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (status, body) = post_json(
        &client,
        server.url("/films"),
        json!({
            "title": "  <script>alert(1)</script>Safe & Sound  ",
            "language_id": lang
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["film_id"].as_i64().unwrap();

    let (_, body) = get_json(&client, server.url(&format!("/films/{id}"))).await;
    assert_eq!(body["data"]["title"], "alert(1)Safe &amp; Sound");
}

#[tokio::test]
async fn missing_film_returns_not_found_envelope() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/films/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Film not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/films/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid film id");
}

#[tokio::test]
async fn actor_update_touches_only_submitted_fields() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (_, body) = post_json(
        &client,
        server.url("/actors"),
        json!({ "first_name": "Penelope", "last_name": "Guiness" }),
    )
    .await;
    let id = body["data"]["actor_id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/actors/{id}")),
        json!({ "first_name": "Penny" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let actor = &body["data"];
    assert_eq!(actor["first_name"], "Penny");
    assert_eq!(actor["last_name"], "Guiness");
    assert_eq!(actor["full_name"], "Penny Guiness");
}

#[tokio::test]
async fn actor_filmography_lists_linked_films() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/actors"),
        json!({ "first_name": "Nick", "last_name": "Wahlberg" }),
    )
    .await;
    let actor_id = body["data"]["actor_id"].as_i64().unwrap();

    let mut film_ids = Vec::new();
    for title in ["Zulu Heart", "Adaptation Holes"] {
        let (_, body) = post_json(
            &client,
            server.url("/films"),
            json!({ "title": title, "language_id": lang }),
        )
        .await;
        film_ids.push(body["data"]["film_id"].as_i64().unwrap());
    }
    for film_id in &film_ids {
        server.store.link_film_actor(actor_id, *film_id).unwrap();
    }

    let (status, body) = get_json(&client, server.url(&format!("/actors/{actor_id}/films"))).await;
    assert_eq!(status, StatusCode::OK);
    let films = body["data"].as_array().unwrap();
    assert_eq!(films.len(), 2);
    assert_eq!(films[0]["title"], "Adaptation Holes");
    assert_eq!(films[1]["title"], "Zulu Heart");
}

#[tokio::test]
async fn actor_delete_refused_while_cast_in_a_film() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/actors"),
        json!({ "first_name": "Ed", "last_name": "Chase" }),
    )
    .await;
    let actor_id = body["data"]["actor_id"].as_i64().unwrap();
    let (_, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "title": "Chained Alone", "language_id": lang }),
    )
    .await;
    let film_id = body["data"]["film_id"].as_i64().unwrap();
    server.store.link_film_actor(actor_id, film_id).unwrap();

    let res = client
        .delete(server.url(&format!("/actors/{actor_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to delete the actor"));

    // The row must survive the refused delete.
    let (status, _) = get_json(&client, server.url(&format!("/actors/{actor_id}"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn customer_email_must_be_unique() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = json!({
        "store_id": 1,
        "first_name": "Mary",
        "last_name": "Smith",
        "email": "mary.smith@sakilacustomer.org",
        "address_id": 5
    });
    let (status, _) = post_json(&client, server.url("/customers"), first.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&client, server.url("/customers"), first).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The email is already in use");
}

#[tokio::test]
async fn customer_may_keep_own_email_on_update() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (_, body) = post_json(
        &client,
        server.url("/customers"),
        json!({
            "store_id": 1,
            "first_name": "Patricia",
            "last_name": "Johnson",
            "email": "patricia@sakilacustomer.org",
            "address_id": 6
        }),
    )
    .await;
    let id = body["data"]["customer_id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/customers/{id}")),
        json!({ "first_name": "Pat", "email": "patricia@sakilacustomer.org" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Pat");

    let (_, body) = post_json(
        &client,
        server.url("/customers"),
        json!({
            "store_id": 1,
            "first_name": "Linda",
            "last_name": "Williams",
            "email": "linda@sakilacustomer.org",
            "address_id": 7
        }),
    )
    .await;
    let other = body["data"]["customer_id"].as_i64().unwrap();

    let (status, body) = put_json(
        &client,
        server.url(&format!("/customers/{other}")),
        json!({ "email": "patricia@sakilacustomer.org" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The email is already in use by another customer");
}

#[tokio::test]
async fn customer_delete_guarded_by_rentals() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/customers"),
        json!({
            "store_id": 1,
            "first_name": "Barbara",
            "last_name": "Jones",
            "email": "barbara@sakilacustomer.org",
            "address_id": 8
        }),
    )
    .await;
    let customer_id = body["data"]["customer_id"].as_i64().unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/films"),
        json!({ "title": "Borrowed Time", "language_id": lang }),
    )
    .await;
    let film_id = body["data"]["film_id"].as_i64().unwrap();
    server
        .store
        .add_rental(customer_id, film_id, ts(2005, 5, 24), None)
        .unwrap();

    let res = client
        .delete(server.url(&format!("/customers/{customer_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Cannot delete customer because it has associated rentals"
    );

    server.store.clear_rentals(customer_id).unwrap();
    let res = client
        .delete(server.url(&format!("/customers/{customer_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (status, _) = get_json(&client, server.url(&format!("/customers/{customer_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_rental_history_is_newest_first() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let lang = server.store.add_language("English").unwrap();

    let (_, body) = post_json(
        &client,
        server.url("/customers"),
        json!({
            "store_id": 2,
            "first_name": "Elizabeth",
            "last_name": "Brown",
            "email": "elizabeth@sakilacustomer.org",
            "address_id": 9
        }),
    )
    .await;
    let customer_id = body["data"]["customer_id"].as_i64().unwrap();

    let mut film_ids = Vec::new();
    for title in ["Early Pick", "Late Pick"] {
        let (_, body) = post_json(
            &client,
            server.url("/films"),
            json!({ "title": title, "language_id": lang }),
        )
        .await;
        film_ids.push(body["data"]["film_id"].as_i64().unwrap());
    }
    server
        .store
        .add_rental(customer_id, film_ids[0], ts(2005, 5, 1), Some(ts(2005, 5, 4)))
        .unwrap();
    server
        .store
        .add_rental(customer_id, film_ids[1], ts(2005, 6, 10), None)
        .unwrap();

    let (status, body) = get_json(
        &client,
        server.url(&format!("/customers/{customer_id}/rentals")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rentals = body["data"].as_array().unwrap();
    assert_eq!(rentals.len(), 2);
    assert_eq!(rentals[0]["title"], "Late Pick");
    assert_eq!(rentals[1]["title"], "Early Pick");
    assert_eq!(rentals[1]["days_rented"], 3);
}

#[tokio::test]
async fn unknown_path_gets_enveloped_not_found() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/rentals")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Endpoint not found");
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/films"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Invalid JSON body");
}

#[tokio::test]
async fn preflight_requests_short_circuit() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .request(Method::OPTIONS, server.url("/films"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn root_serves_the_info_document() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, server.url("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["api_name"], "Sakila REST API");
    assert!(body["data"]["endpoints"]["films"].is_object());
}
