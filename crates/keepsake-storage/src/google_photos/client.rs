//! Thin REST client for the Photos Library API.
//!
//! Every call takes a bearer token; session handling lives in the parent module.

use super::models::{
    Album, AlbumList, BatchCreateRequest, BatchCreateResponse, CreateAlbumRequest, MediaItem,
    NewAlbum, NewMediaItem, SimpleMediaItem,
};
use crate::{StorageError, StorageResult};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Response};

const ALBUM_PAGE_SIZE: u32 = 50;

#[derive(Clone)]
pub struct GooglePhotosClient {
    http: Client,
    api_base: String,
}

impl GooglePhotosClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base, path)
    }

    /// First phase of an upload: send the raw bytes and receive an upload token.
    pub async fn upload_bytes(
        &self,
        access_token: &str,
        data: Bytes,
        content_type: &str,
        file_name: &str,
    ) -> StorageResult<String> {
        let response = self
            .http
            .post(self.url("uploads"))
            .bearer_auth(access_token)
            .header("Content-type", "application/octet-stream")
            .header("X-Goog-Upload-Content-Type", content_type)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("X-Goog-Upload-File-Name", file_name)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Provider(format!("upload request failed: {}", e)))?;

        let token = check_status(response, "upload bytes")
            .await?
            .text()
            .await
            .map_err(|e| StorageError::Provider(format!("failed to read upload token: {}", e)))?;

        if token.trim().is_empty() {
            return Err(StorageError::Provider("empty upload token".to_string()));
        }

        Ok(token.trim().to_string())
    }

    /// Second phase of an upload: turn an upload token into a media item.
    pub async fn create_media_item(
        &self,
        access_token: &str,
        upload_token: &str,
        file_name: &str,
        description: &str,
    ) -> StorageResult<MediaItem> {
        let body = BatchCreateRequest {
            new_media_items: vec![NewMediaItem {
                description,
                simple_media_item: SimpleMediaItem {
                    file_name,
                    upload_token,
                },
            }],
        };

        let response = self
            .http
            .post(self.url("mediaItems:batchCreate"))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::Provider(format!("batchCreate request failed: {}", e)))?;

        let created: BatchCreateResponse = check_status(response, "create media item")
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Provider(format!("invalid batchCreate response: {}", e)))?;

        let result = created
            .new_media_item_results
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Provider("batchCreate returned no results".to_string()))?;

        match result.media_item {
            Some(item) => Ok(item),
            None => {
                let message = result
                    .status
                    .and_then(|s| s.message)
                    .unwrap_or_else(|| "media item was not created".to_string());
                Err(StorageError::Provider(message))
            }
        }
    }

    /// List every album in the library, following pagination.
    pub async fn list_albums(&self, access_token: &str) -> StorageResult<Vec<Album>> {
        let mut albums = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.url("albums"))
                .bearer_auth(access_token)
                .query(&[("pageSize", ALBUM_PAGE_SIZE.to_string())]);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| StorageError::Provider(format!("list albums request failed: {}", e)))?;

            let page: AlbumList = check_status(response, "list albums")
                .await?
                .json()
                .await
                .map_err(|e| StorageError::Provider(format!("invalid albums response: {}", e)))?;

            albums.extend(page.albums);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(albums)
    }

    pub async fn create_album(&self, access_token: &str, title: &str) -> StorageResult<Album> {
        let response = self
            .http
            .post(self.url("albums"))
            .bearer_auth(access_token)
            .json(&CreateAlbumRequest {
                album: NewAlbum { title },
            })
            .send()
            .await
            .map_err(|e| StorageError::Provider(format!("create album request failed: {}", e)))?;

        check_status(response, "create album")
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Provider(format!("invalid album response: {}", e)))
    }

    pub async fn get_media_item(&self, access_token: &str, id: &str) -> StorageResult<MediaItem> {
        let response = self
            .http
            .get(self.url(&format!("mediaItems/{}", utf8_percent_encode(id, NON_ALPHANUMERIC))))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| StorageError::Provider(format!("get media item request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(id.to_string()));
        }

        check_status(response, "get media item")
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Provider(format!("invalid media item response: {}", e)))
    }
}

async fn check_status(response: Response, operation: &str) -> StorageResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StorageError::Provider(format!(
        "{} returned {}: {}",
        operation, status, body
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn upload_bytes_uses_raw_protocol() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/uploads"))
            .and(header("authorization", "Bearer at-1"))
            .and(header("x-goog-upload-protocol", "raw"))
            .and(header("x-goog-upload-content-type", "image/png"))
            .and(header("x-goog-upload-file-name", "cake.png"))
            .respond_with(ResponseTemplate::new(200).set_body_string("upload-token-1"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GooglePhotosClient::new(server.uri());
        let token = client
            .upload_bytes("at-1", Bytes::from_static(b"png"), "image/png", "cake.png")
            .await
            .unwrap();
        assert_eq!(token, "upload-token-1");
    }

    #[tokio::test]
    async fn create_media_item_reports_item_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/mediaItems:batchCreate"))
            .and(body_partial_json(serde_json::json!({
                "newMediaItems": [{ "simpleMediaItem": { "uploadToken": "tok" } }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "newMediaItemResults": [{
                    "uploadToken": "tok",
                    "status": { "message": "Failed: invalid upload token" }
                }]
            })))
            .mount(&server)
            .await;

        let client = GooglePhotosClient::new(server.uri());
        let err = client
            .create_media_item("at", "tok", "a.jpg", "desc")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Provider(msg) if msg.contains("invalid upload token")));
    }

    #[tokio::test]
    async fn list_albums_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/albums"))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": [{ "id": "a2", "title": "Second" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/albums"))
            .and(query_param("pageSize", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "albums": [{ "id": "a1", "title": "First" }],
                "nextPageToken": "next"
            })))
            .mount(&server)
            .await;

        let client = GooglePhotosClient::new(server.uri());
        let albums = client.list_albums("at").await.unwrap();
        let ids: Vec<_> = albums.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn provider_errors_carry_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/albums"))
            .respond_with(ResponseTemplate::new(403).set_body_string("insufficient scopes"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GooglePhotosClient::new(server.uri());
        let err = client.create_album("at", "Birthday").await.unwrap_err();
        assert!(matches!(err, StorageError::Provider(msg) if msg.contains("403")));
    }
}
