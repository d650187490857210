//! Token request endpoint.

use tracing::debug;

use super::request::{ApiRequest, HttpTransport};
use crate::access::AccessInfo;
use crate::auth::TokenRequest;
use crate::error::{ClientError, Result};

/// POST a token request and parse the response into an [`AccessInfo`].
///
/// A 401 surfaces as `Unauthorized`; a successful response that is not JSON
/// is an `AuthorizationFailure`.
pub async fn request_token(transport: &HttpTransport, request: &TokenRequest) -> Result<AccessInfo> {
    debug!(url = %request.url, "Requesting token");

    let mut api = ApiRequest::post(&request.url, request.body.clone());
    if let Some(token) = &request.auth_token {
        api = api.token(token);
    }

    let response = transport.send(api).await?;
    let body: serde_json::Value = serde_json::from_str(&response.body).map_err(|_| {
        ClientError::AuthorizationFailure(format!(
            "identity service at {} returned a non-JSON response",
            response.url
        ))
    })?;

    let access = AccessInfo::factory(&body, &response.headers)?;
    debug!(
        user_id = access.user_id().unwrap_or("-"),
        project_id = access.project_id().unwrap_or("-"),
        "Token issued"
    );
    Ok(access)
}

/// Validate `token` (v2), returning the access record it grants.
pub async fn validate_token(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    token: &str,
) -> Result<AccessInfo> {
    let url = format!("{base_url}/tokens/{}", super::encode_path_segment(token));
    let response = transport.send(ApiRequest::get(url).token(auth_token)).await?;
    let body: serde_json::Value = response.json()?;
    AccessInfo::factory(&body, &response.headers)
}

/// Revoke `token` (v2).
pub async fn delete_token(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    token: &str,
) -> Result<()> {
    let url = format!("{base_url}/tokens/{}", super::encode_path_segment(token));
    transport
        .send(ApiRequest::delete(url).token(auth_token))
        .await?;
    Ok(())
}
