use serde_json::{json, Value};
use sidearm::{Client, ClientBuilder, Params, Request, SidearmError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    ClientBuilder::new()
        .api_key("sk_test_123")
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn empty_api_key_fails_before_any_request() {
    let mock_server = MockServer::start().await;

    let result = ClientBuilder::new()
        .api_key("")
        .base_url(mock_server.uri())
        .build();

    assert!(matches!(result, Err(SidearmError::Config { .. })));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn core_headers_are_always_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ping"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: Value = client
        .http()
        .get("/api/v1/ping", Params::new())
        .await
        .unwrap();
    assert_eq!(value, json!({ "ok": true }));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn post_sends_json_body_with_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/things"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(body_json(json!({ "name": "a" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": "t1" } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created: Value = client
        .http()
        .post_one("/api/v1/things", Some(&json!({ "name": "a" })))
        .await
        .unwrap();
    assert_eq!(created, json!({ "id": "t1" }));
}

#[tokio::test]
async fn query_params_skip_absent_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/media"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = Params::new()
        .set("limit", 10)
        .set_opt("cursor", None::<&str>);
    let page = client
        .http()
        .get_list::<Value>("/api/v1/media", params)
        .await
        .unwrap();
    assert!(page.data.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("limit=10"));
}

#[tokio::test]
async fn get_one_unwraps_data() {
    let mock_server = MockServer::start().await;
    let resource = json!({ "id": "m1", "tags": ["a", "b"], "nested": { "k": 1 } });

    Mock::given(method("GET"))
        .and(path("/api/v1/media/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": resource.clone() })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: Value = client
        .http()
        .get_one("/api/v1/media/m1", Params::new())
        .await
        .unwrap();
    assert_eq!(value, resource);
}

#[tokio::test]
async fn get_list_returns_cursor_from_meta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "m1" }, { "id": "m2" }],
            "meta": { "next_cursor": "cur_2" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .http()
        .get_list::<Value>("/api/v1/media", Params::new())
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.cursor.as_deref(), Some("cur_2"));
    assert!(page.has_more());
}

#[tokio::test]
async fn get_list_without_meta_has_no_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [1, 2, 3] })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .http()
        .get_list::<u32>("/api/v1/media", Params::new())
        .await
        .unwrap();
    assert_eq!(page.data, vec![1, 2, 3]);
    assert!(page.cursor.is_none());
    assert!(!page.has_more());
}

#[tokio::test]
async fn error_message_comes_from_message_field() {
    let mock_server = MockServer::start().await;
    let body = json!({ "message": "media_url is not reachable", "error": "bad_request" });

    Mock::given(method("POST"))
        .and(path("/api/v1/protect"))
        .respond_with(ResponseTemplate::new(400).set_body_json(body.clone()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .http()
        .post::<Value, _>("/api/v1/protect", Some(&json!({})))
        .await
        .unwrap_err();

    match err {
        SidearmError::Api {
            status,
            message,
            body: parsed,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "media_url is not reachable");
            assert_eq!(parsed, Some(body));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_message_falls_back_to_error_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/media/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .http()
        .get_one::<Value>("/api/v1/media/missing", Params::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, SidearmError::Api { ref message, .. } if message == "not found"));
}

#[tokio::test]
async fn non_json_error_uses_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/media/m1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .http()
        .delete::<Value>("/api/v1/media/m1")
        .await
        .unwrap_err();

    match err {
        SidearmError::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
            assert!(body.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_success_is_returned_as_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let text: String = client.http().get("/health", Params::new()).await.unwrap();
    assert_eq!(text, "OK");
}

#[tokio::test]
async fn envelope_without_data_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/media/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "m1" })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .http()
        .get_one::<Value>("/api/v1/media/m1", Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SidearmError::Decode(_)));
}

#[tokio::test]
async fn patch_and_delete_unwrap_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/media/m1"))
        .and(body_json(json!({ "original_media_url": "https://example.com/x.png" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "m1" } })))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/media/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleted": true } })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let updated: Value = client
        .http()
        .patch_one(
            "/api/v1/media/m1",
            &json!({ "original_media_url": "https://example.com/x.png" }),
        )
        .await
        .unwrap();
    assert_eq!(updated["id"], "m1");

    let deleted: Value = client.http().delete_one("/api/v1/media/m1").await.unwrap();
    assert_eq!(deleted, json!({ "deleted": true }));
}

#[tokio::test]
async fn execute_accepts_query_on_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/search"))
        .and(query_param("limit", "5"))
        .and(body_json(json!({ "media_url": "https://example.com/a.png" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = Request::post("/api/v1/search")
        .params(Params::new().set("limit", 5))
        .json(json!({ "media_url": "https://example.com/a.png" }));
    let value = client.http().execute(request).await.unwrap();
    assert_eq!(value, json!({ "results": [] }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = ClientBuilder::new()
        .api_key("sk_test_123")
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let err = client
        .http()
        .get::<Value>("/api/v1/ping", Params::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SidearmError::Http(_)));
}
