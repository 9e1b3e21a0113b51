// This file is part of the terraform-provider-stackit project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thin client for the STACKIT REST APIs
//!
//! Every service exposes a JSON API under `/v1/projects/{projectId}/...`, authenticated
//! with a bearer token. [`ApiClient`] knows the base endpoint of one service and sends
//! the requests; the typed operations live next to each service.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

pub mod error;
pub mod wait;

pub use error::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<str>,
}

impl ApiClient {
    /// Create a client for the service reachable at `endpoint`
    pub fn new(http: reqwest::Client, endpoint: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|source| ApiError::Endpoint {
            endpoint: endpoint.to_owned(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(endpoint.to_owned()));
        }
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// Base endpoint of the service
    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL of a path relative to the endpoint
    ///
    /// Each segment is percent-encoded, so identifiers cannot escape their position.
    pub fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.send(Method::GET, segments, None::<&()>).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::POST, segments, Some(body)).await
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, segments, Some(body)).await
    }

    pub async fn patch<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, segments, Some(body)).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        self.send::<(), serde_json::Value>(Method::DELETE, segments, None)
            .await
            .map(|_| ())
    }

    async fn send<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        debug!(%method, %url, "calling STACKIT API");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(method, url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                code: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        decode(&bytes)
    }
}

/// Identifier of a created entity, which the API must return
pub fn require_id(id: Option<String>, what: &str) -> Result<String> {
    id.filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Failed(format!("{what} id not present in the response")))
}

/// Decode a JSON body, an empty body being decoded as `null`
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        Ok(serde_json::from_slice(b"null")?)
    } else {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Extract the message of an error body
///
/// STACKIT services answer errors with `{"message": ...}` (sometimes `{"error": ...}`),
/// anything else is reported verbatim.
fn error_message(bytes: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(body)) = serde_json::from_slice(bytes) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(message)) = body.get(key) {
                return message.clone();
            }
        }
    }
    String::from_utf8_lossy(bytes).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), endpoint, "token").unwrap()
    }

    #[test]
    fn url_appends_segments() {
        let client = client("https://dns.api.stackit.cloud");
        let url = client.url(&["v1", "projects", "pid", "zones"]).unwrap();
        assert_eq!(url.as_str(), "https://dns.api.stackit.cloud/v1/projects/pid/zones");
    }

    #[test]
    fn url_keeps_endpoint_prefix() {
        let client = client("http://localhost:8080/proxy/");
        let url = client.url(&["v1", "projects"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v1/projects");
    }

    #[test]
    fn url_escapes_segments() {
        let client = client("https://dns.api.stackit.cloud");
        let url = client.url(&["v1", "projects", "a/../b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://dns.api.stackit.cloud/v1/projects/a%2F..%2Fb"
        );
    }

    #[test]
    fn invalid_endpoint() {
        let err = ApiClient::new(reqwest::Client::new(), "not a url", "token").unwrap_err();
        assert!(matches!(err, ApiError::Endpoint { .. }));
        let err = ApiClient::new(reqwest::Client::new(), "mailto:admin@example.com", "token")
            .unwrap_err();
        assert!(matches!(err, ApiError::BaseUrl(_)));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: serde_json::Value = decode(b"").unwrap();
        assert_eq!(value, serde_json::Value::Null);
        let value: Option<u32> = decode(b"  \n").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn id_is_required() {
        assert_eq!(require_id(Some("id".to_owned()), "zone").unwrap(), "id");
        assert!(require_id(Some(String::new()), "zone").is_err());
        assert!(require_id(None, "zone").is_err());
    }

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(error_message(br#"{"message":"zone not found"}"#), "zone not found");
        assert_eq!(error_message(br#"{"error":"forbidden"}"#), "forbidden");
        assert_eq!(error_message(b"bad gateway\n"), "bad gateway");
    }
}
