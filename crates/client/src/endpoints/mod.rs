//! REST API endpoint implementations.
//!
//! Free functions taking the transport, the base URL and the caller's token;
//! session handling lives in [`crate::client`].

mod auth;
mod request;
pub mod resource;
pub mod url_encoding;
pub mod v2;
pub mod v3;

pub use auth::{delete_token, request_token, validate_token};
pub use request::{AUTH_TOKEN_HEADER, ApiRequest, ApiResponse, HttpTransport};
pub use resource::{Collection, Query};
pub use url_encoding::encode_path_segment;
