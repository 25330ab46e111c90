//! Serverless blog posts API: request dispatch, CORS negotiation, admin
//! auth, and cursor-paginated reads over a DynamoDB posts table.

pub mod auth;
pub mod config;
pub mod cors;
pub mod cursor;
pub mod error;
pub mod handlers;
pub mod models;
pub mod request;
pub mod response;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use handlers::{handle_event, AppState};
pub use models::{DeleteResponse, ListResponse, Post};
pub use store::{DynamoPostStore, PostStore};
