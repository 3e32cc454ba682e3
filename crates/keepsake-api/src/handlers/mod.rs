pub mod albums;
pub mod google_auth;
pub mod health;
pub mod photo;
pub mod timeline;
pub mod upload_photo;
