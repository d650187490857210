//! Generic collection calls shared by every resource.
//!
//! Resources are wrapped in a single-key envelope: `{"tenant": {...}}` for one
//! item and `{"tenants": [...]}` (or `{"tenants": {"values": [...]}}`) for a
//! list. A [`Collection`] names the path and both envelope keys.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::encode_path_segment;
use super::request::{ApiRequest, ApiResponse, HttpTransport};
use crate::error::{ClientError, Result};
use crate::serde_helpers::list_or_values;

/// Path and envelope keys of one resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Path below the management URL, with a leading `/`.
    pub path: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Collection {
    pub const fn new(path: &'static str, singular: &'static str, plural: &'static str) -> Self {
        Self {
            path,
            singular,
            plural,
        }
    }

    pub fn collection_url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path)
    }

    pub fn item_url(&self, base_url: &str, id: &str) -> String {
        format!("{base_url}{}/{}", self.path, encode_path_segment(id))
    }
}

/// Query parameters of a list call; unset values are omitted.
pub type Query<'a> = &'a [(&'a str, Option<&'a str>)];

/// Unwrap `{"<key>": item}`.
pub(crate) fn unwrap_item<T: DeserializeOwned>(response: &ApiResponse, key: &str) -> Result<T> {
    let mut body: Value = response.json()?;
    let item = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ClientError::MalformedResponse(format!("missing '{key}' in response")))?;
    serde_json::from_value(item)
        .map_err(|e| ClientError::MalformedResponse(format!("invalid '{key}': {e}")))
}

/// Unwrap `{"<key>": [...]}` or `{"<key>": {"values": [...]}}`.
pub(crate) fn unwrap_list<T: DeserializeOwned>(
    response: &ApiResponse,
    key: &str,
) -> Result<Vec<T>> {
    let mut body: Value = response.json()?;
    let list = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ClientError::MalformedResponse(format!("missing '{key}' in response")))?;
    list_or_values(list).map_err(|e| ClientError::MalformedResponse(format!("invalid '{key}': {e}")))
}

pub async fn list<T: DeserializeOwned>(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    collection: Collection,
    query: Query<'_>,
) -> Result<Vec<T>> {
    list_at(
        transport,
        &collection.collection_url(base_url),
        auth_token,
        collection.plural,
        query,
    )
    .await
}

/// List the items under an arbitrary URL, e.g. `/tenants/{id}/users`.
pub async fn list_at<T: DeserializeOwned>(
    transport: &HttpTransport,
    url: &str,
    auth_token: &str,
    key: &str,
    query: Query<'_>,
) -> Result<Vec<T>> {
    let request = query
        .iter()
        .fold(ApiRequest::get(url).token(auth_token), |request, (k, v)| {
            request.query(k, *v)
        });
    let response = transport.send(request).await?;
    unwrap_list(&response, key)
}

pub async fn get<T: DeserializeOwned>(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    collection: Collection,
    id: &str,
) -> Result<T> {
    let request = ApiRequest::get(collection.item_url(base_url, id)).token(auth_token);
    let response = transport.send(request).await?;
    unwrap_item(&response, collection.singular)
}

/// `POST` the collection with `{"<singular>": params}`.
pub async fn create<T: DeserializeOwned, P: Serialize>(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    collection: Collection,
    params: &P,
) -> Result<T> {
    let body = envelope(collection.singular, params)?;
    let request = ApiRequest::post(collection.collection_url(base_url), body).token(auth_token);
    let response = transport.send(request).await?;
    unwrap_item(&response, collection.singular)
}

/// Send `{"<singular>": params}` to the item URL with `method` (v2 uses POST or PUT, v3 PATCH).
pub async fn update<T: DeserializeOwned, P: Serialize>(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    collection: Collection,
    method: Method,
    id: &str,
    params: &P,
) -> Result<T> {
    send_item(
        transport,
        method,
        &collection.item_url(base_url, id),
        auth_token,
        collection.singular,
        params,
    )
    .await
}

/// Send `{"<key>": params}` to `url` and unwrap the same key from the response.
pub async fn send_item<T: DeserializeOwned, P: Serialize>(
    transport: &HttpTransport,
    method: Method,
    url: &str,
    auth_token: &str,
    key: &str,
    params: &P,
) -> Result<T> {
    let body = envelope(key, params)?;
    let request = ApiRequest::new(method, url).body(body).token(auth_token);
    let response = transport.send(request).await?;
    unwrap_item(&response, key)
}

pub async fn delete(
    transport: &HttpTransport,
    base_url: &str,
    auth_token: &str,
    collection: Collection,
    id: &str,
) -> Result<()> {
    delete_at(transport, &collection.item_url(base_url, id), auth_token).await
}

/// `DELETE` an arbitrary URL, ignoring any response body.
pub async fn delete_at(transport: &HttpTransport, url: &str, auth_token: &str) -> Result<()> {
    transport
        .send(ApiRequest::delete(url).token(auth_token))
        .await?;
    Ok(())
}

/// `PUT` an arbitrary URL without a body (grants and memberships).
pub async fn put_at(transport: &HttpTransport, url: &str, auth_token: &str) -> Result<()> {
    transport.send(ApiRequest::put(url).token(auth_token)).await?;
    Ok(())
}

fn envelope<P: Serialize>(key: &str, params: &P) -> Result<Value> {
    let inner = serde_json::to_value(params)
        .map_err(|e| ClientError::InvalidParameters(format!("cannot encode '{key}': {e}")))?;
    Ok(json!({ key: inner }))
}
