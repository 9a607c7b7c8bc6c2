use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DecodedForm, EchoedRequest};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, content_type: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(body.to_string())
        .unwrap()
}

// --- ping ---

#[tokio::test]
async fn ping_returns_pong() {
    let resp = app()
        .oneshot(Request::builder().uri("/ping").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "pong");
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_headers_and_body() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/echo")
                .header("x-trace", "t-1")
                .body(r#"{"a":1}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/json");
    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.method, "PATCH");
    assert_eq!(echoed.header_values("x-trace"), vec!["t-1"]);
    assert_eq!(echoed.body, r#"{"a":1}"#);
}

// --- form ---

#[tokio::test]
async fn form_decodes_repeated_keys_in_order() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/form",
            "application/x-www-form-urlencoded",
            "tag=a&name=Ada+Lovelace&tag=b",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let form: DecodedForm = body_json(resp).await;
    assert_eq!(
        form.fields,
        vec![
            ("tag".to_string(), "a".to_string()),
            ("name".to_string(), "Ada Lovelace".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]
    );
}

#[tokio::test]
async fn form_rejects_other_content_types() {
    let resp = app()
        .oneshot(request("POST", "/form", "application/json", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], 415);
    assert_eq!(body["count"], 0);
}

// --- multipart ---

#[tokio::test]
async fn multipart_decodes_text_fields() {
    let body = "--XYZ\r\n\
                Content-Disposition: form-data; name=\"name\"\r\n\r\n\
                Ada\r\n\
                --XYZ\r\n\
                Content-Disposition: form-data; name=\"tag\"\r\n\r\n\
                math\r\n\
                --XYZ--\r\n";
    let resp = app()
        .oneshot(request(
            "POST",
            "/multipart",
            "multipart/form-data; boundary=XYZ",
            body,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let form: DecodedForm = body_json(resp).await;
    assert_eq!(form.content_type, "multipart/form-data; boundary=XYZ");
    assert_eq!(
        form.fields,
        vec![
            ("name".to_string(), "Ada".to_string()),
            ("tag".to_string(), "math".to_string()),
        ]
    );
}

#[tokio::test]
async fn multipart_without_boundary_is_rejected() {
    let resp = app()
        .oneshot(request("POST", "/multipart", "text/plain", "hello"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- envelope ---

#[tokio::test]
async fn envelope_wraps_posted_array_with_count() {
    let resp = app()
        .oneshot(request("POST", "/envelope", "application/json", r#"[1,2,3]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(
        body,
        r#"{"success":true,"code":200,"message":"ok","count":3,"data":[1,2,3]}"#
    );
}

#[tokio::test]
async fn envelope_omits_count_for_objects() {
    let resp = app()
        .oneshot(request("POST", "/envelope", "application/json", r#"{"k":"v"}"#))
        .await
        .unwrap();

    let body: serde_json::Value = body_json(resp).await;
    assert!(body.get("count").is_none());
    assert_eq!(body["data"]["k"], "v");
}

// --- status ---

#[tokio::test]
async fn status_route_writes_matching_code() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/status/404")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_bytes(resp).await,
        r#"{"code":404,"message":"not found","count":0,"data":null}"#
    );
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/status/teapot")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
