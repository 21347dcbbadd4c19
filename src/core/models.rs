//! Decoded call outcomes and generic response envelopes
//!
//! Every payload the API returns is wrapped as `{"data": ...}`; list
//! endpoints additionally carry a `pagination` object. The envelopes here
//! are resource-agnostic so executor layers built on top of this crate can
//! extract typed values without per-resource glue.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::errors::Result;

/// Decoded outcome of a non-DELETE request.
///
/// Produced once per successful call and owned by the caller; the pipeline
/// keeps no reference to it.
#[derive(Debug, Clone)]
pub struct ApiResult {
    /// HTTP status code, always in the 2xx range.
    pub status_code: u16,
    /// Response headers as received.
    pub headers: HeaderMap,
    /// Parsed JSON body.
    pub json_body: serde_json::Value,
}

impl ApiResult {
    /// Deserialize the JSON body into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.json_body.clone())?)
    }
}

/// Single-object response envelope: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseObject<T> {
    /// The wrapped payload.
    pub data: T,
}

/// One element of a list response, itself wrapped as `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataWrapper<T> {
    /// The wrapped payload.
    pub data: T,
}

/// Pagination window reported by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Pagination {
    /// Number of skipped items.
    pub offset: u32,
    /// Maximum number of returned items.
    pub limit: u32,
}

/// List response envelope: `{"data": [{"data": ...}, ...], "pagination": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseList<T> {
    /// The wrapped items, in server order.
    pub data: Vec<DataWrapper<T>>,
    /// Pagination window for this page.
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ResponseList<T> {
    /// Unwrap the items, discarding the per-element envelopes.
    pub fn into_items(self) -> Vec<T> {
        self.data.into_iter().map(|wrapper| wrapper.data).collect()
    }
}
