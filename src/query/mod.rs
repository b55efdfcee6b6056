//! # Query Engine
//!
//! Filtering and pagination over a snapshot of the product store.
//!
//! A read request becomes a [`ProductFilter`] and a [`Pagination`], both parsed from the
//! raw query string by [`parse_list_params`]. [`run_query`] then keeps the snapshot's
//! order, drops every product that fails a predicate and slices out one page.
//!
//! Predicates are ANDed and evaluated in a fixed order:
//! price lower bound, price upper bound, exact name, name substring.
//! Both name predicates are case-insensitive and may be combined.

use std::collections::HashMap;

use crate::model::Product;
use crate::validation::parse_number;
use thiserror::Error;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 50;

/// Rejected list parameters. Checked in declaration order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid page")]
    InvalidPage,

    #[error("Invalid limit")]
    InvalidLimit,

    #[error("Invalid minPrice")]
    InvalidMinPrice,

    #[error("Invalid maxPrice")]
    InvalidMaxPrice,

    #[error("minPrice cannot be greater than maxPrice")]
    InvertedPriceRange,
}

/// Which page of the filtered sequence to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Index of the first record on this page. Page 0 reads as page 1; absurdly large
    /// pages saturate.
    fn offset(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

/// Conjunction of optional predicates. Name filters are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub name_exact: Option<String>,
    pub name_contains: Option<String>,
}

impl ProductFilter {
    /// Whether `product` satisfies every supplied predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.name_exact.is_none() && self.name_contains.is_none() {
            return true;
        }

        let name = product.name.to_lowercase();
        if self.name_exact.as_ref().is_some_and(|exact| name != *exact) {
            return false;
        }
        if self
            .name_contains
            .as_ref()
            .is_some_and(|needle| !name.contains(needle.as_str()))
        {
            return false;
        }
        true
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub records: Vec<Product>,
    pub total: usize,
}

/// Parses `page`, `limit`, `minPrice`, `maxPrice`, `name` and `q`.
pub fn parse_list_params(
    params: &HashMap<String, String>,
) -> Result<(ProductFilter, Pagination), QueryError> {
    let page = match params.get("page") {
        None => DEFAULT_PAGE,
        Some(raw) => whole_number(raw)
            .filter(|page| *page >= 1)
            .ok_or(QueryError::InvalidPage)?,
    };
    let limit = match params.get("limit") {
        None => DEFAULT_LIMIT,
        Some(raw) => whole_number(raw)
            .filter(|limit| (1..=MAX_LIMIT).contains(limit))
            .ok_or(QueryError::InvalidLimit)?,
    };

    let min_price = params
        .get("minPrice")
        .map(|raw| parse_number(raw).ok_or(QueryError::InvalidMinPrice))
        .transpose()?;
    let max_price = params
        .get("maxPrice")
        .map(|raw| parse_number(raw).ok_or(QueryError::InvalidMaxPrice))
        .transpose()?;
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min > max {
            return Err(QueryError::InvertedPriceRange);
        }
    }

    let filter = ProductFilter {
        min_price,
        max_price,
        name_exact: params.get("name").and_then(|raw| search_term(raw)),
        name_contains: params.get("q").and_then(|raw| search_term(raw)),
    };
    Ok((filter, Pagination { page, limit }))
}

/// Filters `snapshot` and cuts out the requested page, preserving snapshot order.
pub fn run_query(snapshot: &[Product], filter: &ProductFilter, pagination: Pagination) -> QueryResult {
    let filtered: Vec<&Product> = snapshot.iter().filter(|p| filter.matches(p)).collect();
    let total = filtered.len();

    let records = filtered
        .into_iter()
        .skip(pagination.offset())
        .take(usize::try_from(pagination.limit).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    QueryResult { records, total }
}

fn whole_number(raw: &str) -> Option<u64> {
    let n = parse_number(raw)?;
    if n < 0.0 || n.fract() != 0.0 {
        return None;
    }
    // Saturating cast; anything this large is past the last page anyway.
    Some(n as u64)
}

fn search_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
