//! Photos Library API payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_writeable: Option<bool>,
    /// The API encodes this int64 as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_items_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MediaItem {
    /// Provider-hosted URL: the content `baseUrl` when present, else the Photos page.
    pub fn url(&self) -> Option<&str> {
        self.base_url.as_deref().or(self.product_url.as_deref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlbumList {
    #[serde(default)]
    pub albums: Vec<Album>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchCreateRequest<'a> {
    pub new_media_items: Vec<NewMediaItem<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewMediaItem<'a> {
    pub description: &'a str,
    pub simple_media_item: SimpleMediaItem<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SimpleMediaItem<'a> {
    pub file_name: &'a str,
    pub upload_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchCreateResponse {
    #[serde(default)]
    pub new_media_item_results: Vec<NewMediaItemResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewMediaItemResult {
    pub status: Option<ItemStatus>,
    pub media_item: Option<MediaItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemStatus {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAlbumRequest<'a> {
    pub album: NewAlbum<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewAlbum<'a> {
    pub title: &'a str,
}
