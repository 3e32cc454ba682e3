//! Google Photos backend integration tests. Google's token endpoint and the Photos Library
//! API are served by wiremock.
//!
//! Run with: `cargo test -p keepsake-api --test google_photos_test`

mod helpers;

use helpers::{api_path, photo_form, setup_google_app};
use serde_json::{json, Value};
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn refuse_all_traffic(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

async fn mount_code_exchange(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Run the consent flow through the HTTP surface and return the session id.
async fn authorize(app: &helpers::TestApp) -> String {
    let request: Value = app.client().get("/auth/google/url").await.json();
    let state = request["state"].as_str().unwrap().to_string();

    let response = app
        .client()
        .get("/auth/google/callback")
        .add_query_param("code", "auth-code")
        .add_query_param("state", &state)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    body["userId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_upload_without_session_is_unauthorized_and_never_calls_google() {
    let server = MockServer::start().await;
    refuse_all_traffic(&server).await;
    let (app, _google) = setup_google_app(&server);
    let client = app.client();

    let response = client
        .post(&api_path("/upload-photo"))
        .multipart(photo_form(&[("year", "2024")]))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(
        response.json::<Value>()["error"],
        "Google Photos authorization required"
    );

    let response = client
        .post(&api_path("/upload-photo"))
        .multipart(photo_form(&[("userId", "unknown-session")]))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 401);

    let timeline: Vec<Value> = client.get(&api_path("/timeline")).await.json();
    assert!(timeline.is_empty());
}

#[tokio::test]
async fn test_authorize_redirects_to_consent_screen() {
    let server = MockServer::start().await;
    let (app, _google) = setup_google_app(&server);

    let response = app.client().get("/auth/google").await;

    assert_eq!(response.status_code(), 303);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://accounts.example.test/o/oauth2/v2/auth"));
    assert!(location.contains("access_type=offline"));
}

#[tokio::test]
async fn test_callback_without_code_is_rejected() {
    let server = MockServer::start().await;
    refuse_all_traffic(&server).await;
    let (app, _google) = setup_google_app(&server);

    let response = app
        .client()
        .get("/auth/google/callback")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .client()
        .get("/auth/google/callback")
        .add_query_param("error", "access_denied")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_callback_with_forged_state_is_rejected() {
    let server = MockServer::start().await;
    refuse_all_traffic(&server).await;
    let (app, google) = setup_google_app(&server);

    let response = app
        .client()
        .get("/auth/google/callback")
        .add_query_param("code", "auth-code")
        .add_query_param("state", "forged")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(google.sessions().is_empty().await);
}

#[tokio::test]
async fn test_authorized_upload_reaches_google_and_timeline() {
    let server = MockServer::start().await;
    mount_code_exchange(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/uploads"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("upload-token"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/mediaItems:batchCreate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newMediaItemResults": [{
                "uploadToken": "upload-token",
                "status": { "message": "Success" },
                "mediaItem": {
                    "id": "media-1",
                    "description": "Cake",
                    "productUrl": "https://photos.google.com/lr/photo/media-1",
                    "baseUrl": "https://lh3.googleusercontent.com/media-1",
                    "mimeType": "image/jpeg",
                    "filename": "cake.jpg"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _google) = setup_google_app(&server);
    let session = authorize(&app).await;

    let response = app
        .client()
        .post(&api_path("/upload-photo"))
        .multipart(photo_form(&[("userId", session.as_str()), ("year", "2024")]))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Photo uploaded successfully to Google Photos");
    assert_eq!(body["mediaItem"]["id"], "media-1");
    assert!(body.get("photo").is_none());
    assert_eq!(body["timelineEvent"]["photoId"], "media-1");
    assert_eq!(body["timelineEvent"]["description"], "Photo uploaded to Google Photos");

    let timeline: Vec<Value> = app.client().get(&api_path("/timeline")).await.json();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0]["photoUrl"], "https://lh3.googleusercontent.com/media-1");
}

#[tokio::test]
async fn test_albums_list_and_create() {
    let server = MockServer::start().await;
    mount_code_exchange(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "albums": [{ "id": "album-1", "title": "Birthday" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/albums"))
        .and(body_string_contains("Party"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "album-2",
            "title": "Party"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _google) = setup_google_app(&server);
    let session = authorize(&app).await;

    let response = app
        .client()
        .get(&api_path("/albums"))
        .add_query_param("userId", session.as_str())
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["albums"][0]["title"], "Birthday");

    let response = app
        .client()
        .post(&api_path("/albums"))
        .json(&json!({ "userId": session, "title": "Party" }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["album"]["id"], "album-2");
}

#[tokio::test]
async fn test_create_album_requires_title() {
    let server = MockServer::start().await;
    refuse_all_traffic(&server).await;
    let (app, _google) = setup_google_app(&server);

    let response = app
        .client()
        .post(&api_path("/albums"))
        .json(&json!({ "userId": "whatever", "title": "  " }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_provider_error_is_generic() {
    let server = MockServer::start().await;
    mount_code_exchange(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/albums"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded for project 1234"))
        .mount(&server)
        .await;

    let (app, _google) = setup_google_app(&server);
    let session = authorize(&app).await;

    let response = app
        .client()
        .get(&api_path("/albums"))
        .add_query_param("userId", session.as_str())
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 500);
    let text = response.text();
    assert!(text.contains("Failed to fetch albums"));
    assert!(!text.contains("1234"));
}

#[tokio::test]
async fn test_tigris_check_absent_on_google_backend() {
    let server = MockServer::start().await;
    let (app, _google) = setup_google_app(&server);

    let response = app
        .client()
        .get(&api_path("/test-tigris"))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 404);

    let health: Value = app.client().get("/health").await.json();
    assert_eq!(health["storage"], "google-photos");
}
