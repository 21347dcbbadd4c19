//! The request/response pipeline shared by every API call
//!
//! One dispatch path handles URL formation, bearer-auth injection, JSON
//! encoding, status dispatch, the success-path content-type check and the
//! error-body decoding. Each call is independent and atomic: it either
//! yields a fully decoded [`ApiResult`] or a typed error, never a partial
//! result. There are no retries; transport failures surface as-is.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use crate::core::config::CrowdinCredentials;
use crate::core::errors::{CrowdinError, ErrorResource, Result};
use crate::core::models::ApiResult;
use crate::core::patch::PatchEntry;

/// Default request timeout applied to the shared HTTP client.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media type every successful response must carry.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type for JSON-Patch request bodies.
const JSON_PATCH_MEDIA_TYPE: &str = "application/json-patch+json";

/// Header carrying the original filename on uploads.
const FILE_NAME_HEADER: &str = "Crowdin-API-FileName";

/// Async client for the Crowdin REST API.
///
/// Holds the resolved base URL, the access token and a pooled
/// `reqwest::Client`. Cloning is cheap and clones share the connection
/// pool, so any number of calls may run concurrently; the client itself
/// carries no per-call state.
#[derive(Debug, Clone)]
pub struct CrowdinApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl CrowdinApiClient {
    /// Create a client from credentials with default transport settings.
    pub fn new(credentials: CrowdinCredentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Self::with_http_client(credentials, http)
    }

    /// Create a client from credentials and a preconfigured `reqwest::Client`.
    ///
    /// Timeouts, proxies and pool sizing are transport configuration; use
    /// this constructor to override the defaults.
    pub fn with_http_client(
        credentials: CrowdinCredentials,
        http: reqwest::Client,
    ) -> Result<Self> {
        credentials.validate()?;

        Ok(Self {
            http,
            base_url: credentials.resolve_base_url(),
            access_token: credentials.access_token,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(CrowdinCredentials::from_env()?)
    }

    /// The resolved base URL this client prepends to every relative path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a GET request with optional query parameters.
    pub async fn send_get(
        &self,
        path: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<ApiResult> {
        let url = self.form_request_url(path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url).bearer_auth(&self.access_token);
        if let Some(query) = query {
            request = request.query(query);
        }

        self.send_request(request).await
    }

    /// Send a POST request with a JSON body and optional extra headers.
    ///
    /// Absent (`None`) fields of the body are omitted from the JSON, per the
    /// request-DTO convention. Extra headers are merged in verbatim and are
    /// never overridden.
    pub async fn send_post<T>(
        &self,
        path: &str,
        body: &T,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResult>
    where
        T: Serialize + ?Sized,
    {
        let url = self.form_request_url(path);
        debug!("POST {}", url);

        let mut request = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body);

        if let Some(extra_headers) = extra_headers {
            for (name, value) in extra_headers {
                request = request.header(name, value);
            }
        }

        self.send_request(request).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn send_put<T>(&self, path: &str, body: &T) -> Result<ApiResult>
    where
        T: Serialize + ?Sized,
    {
        let url = self.form_request_url(path);
        debug!("PUT {}", url);

        let request = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(body);

        self.send_request(request).await
    }

    /// Send a PATCH request carrying an ordered sequence of patch entries.
    ///
    /// The body is a JSON array in input order with Content-Type
    /// `application/json-patch+json`.
    pub async fn send_patch(&self, path: &str, entries: &[PatchEntry]) -> Result<ApiResult> {
        let url = self.form_request_url(path);
        debug!("PATCH {} ({} entries)", url, entries.len());

        let request = self
            .http
            .patch(&url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, JSON_PATCH_MEDIA_TYPE)
            .body(serde_json::to_vec(entries)?);

        self.send_request(request).await
    }

    /// Send a DELETE request and return the bare status code.
    ///
    /// Success responses are not decoded; whether a 2xx status other than
    /// 204 counts as success is the caller's check. Error statuses still
    /// flow through the shared error path.
    pub async fn send_delete(&self, path: &str) -> Result<u16> {
        let url = self.form_request_url(path);
        debug!("DELETE {}", url);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = Self::check_preconditions_and_errors(response).await?;
        Ok(response.status().as_u16())
    }

    /// Upload raw file bytes via POST.
    ///
    /// The body is sent as `application/octet-stream`; the remote API cannot
    /// infer the filename from the stream, so it travels in the
    /// `Crowdin-API-FileName` header.
    pub async fn upload_file(
        &self,
        path: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ApiResult> {
        let url = self.form_request_url(path);
        debug!("POST {} (upload {}, {} bytes)", url, filename, bytes.len());

        let request = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(FILE_NAME_HEADER, filename)
            .body(bytes);

        self.send_request(request).await
    }

    fn form_request_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_request(&self, request: reqwest::RequestBuilder) -> Result<ApiResult> {
        let response = request.send().await?;
        let response = Self::check_preconditions_and_errors(response).await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        // The API always returns JSON on success. The header must equal
        // `application/json` exactly; a parameterized value such as
        // `application/json; charset=utf-8` is rejected too.
        let is_json = content_type
            .as_deref()
            .map(|value| value.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
            .unwrap_or(false);
        if !is_json {
            return Err(CrowdinError::ProtocolViolation { content_type });
        }

        let headers = response.headers().clone();
        let json_body: serde_json::Value = response.json().await?;

        Ok(ApiResult {
            status_code,
            headers,
            json_body,
        })
    }

    /// Map a non-success response to a typed error.
    ///
    /// Error bodies are always JSON regardless of the declared content type:
    /// 400 carries a top-level `errors` array of [`ErrorResource`], every
    /// other status a top-level `error` object with `code` and `message`.
    async fn check_preconditions_and_errors(
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let doc: serde_json::Value = response.json().await?;

        if status == StatusCode::BAD_REQUEST {
            let errors: Vec<ErrorResource> = serde_json::from_value(
                doc.get("errors").cloned().unwrap_or(serde_json::Value::Null),
            )?;
            return Err(CrowdinError::Validation(errors));
        }

        let error = doc.get("error").cloned().unwrap_or(serde_json::Value::Null);
        let code = error
            .get("code")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or_default();
        let message = error
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown error occurred")
            .to_string();

        Err(CrowdinError::Api { code, message })
    }
}
