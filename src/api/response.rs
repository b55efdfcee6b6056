//! # API Response Types
//!
//! JSON payloads returned by the façade on success.

use serde::Serialize;

use crate::model::Product;

/// `{ "product": ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

impl From<Product> for ProductEnvelope {
    fn from(product: Product) -> Self {
        Self { product }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub page: u64,
    pub limit: u64,
    /// Size of the filtered set, independent of paging
    pub total: usize,
    pub products: Vec<Product>,
}

/// Request counters reported by `/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_requests: u64,
    pub products_count: usize,
    /// RFC 3339 timestamp, `null` before the first request
    pub last_request_time: Option<String>,
}
