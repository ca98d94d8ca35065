//! Core data models used throughout the catalog search engine.
//!
//! These types represent the products, filters, sort specifications, and
//! result pages that flow through the query engine, the search coordinator,
//! and the recommendation scorer. All wire-facing types use camelCase field
//! names to match the hosted catalog service's JSON payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as served by the external catalog service.
///
/// Treated as an immutable value for the duration of one search cycle;
/// creation and updates happen exclusively in the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, must be >= 0.
    pub price: f64,
    /// Pre-sale price; present only when the product is on sale and then
    /// expected to be >= `price`. Entries violating that are treated as
    /// malformed by the scorer and excluded from sale rankings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Average review rating in `[0.0, 5.0]`.
    pub rating: f32,
    pub review_count: u32,
    /// Authoritative availability flag for filtering. A `true` value with
    /// `stock_quantity == 0` is a tolerated data-entry edge case.
    pub in_stock: bool,
    pub stock_quantity: u32,
    /// Available size labels, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Primary image reference.
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_on_sale: bool,
}

/// A category facet, fetched once at coordinator initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Sparse conjunctive predicate set applied to products.
///
/// Every field is optional; an absent field imposes no constraint. A product
/// matches when it satisfies ALL present predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Case-insensitive substring match over name, description, category,
    /// tags, and features. Blank behaves like absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Exact (case-sensitive) category equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Minimum rating; 0 behaves like absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_on_sale: Option<bool>,
}

impl FilterSet {
    /// Returns true when no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_rating.is_none()
            && self.in_stock.is_none()
            && self.is_new.is_none()
            && self.is_featured.is_none()
            && self.is_on_sale.is_none()
    }
}

/// The closed set of sortable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Price,
    Rating,
    CreatedAt,
    ReviewCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Field + direction pair governing result ordering. Exactly one pair is
/// active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// One page of filtered, sorted results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Size of the full filtered set, before pagination.
    pub total: usize,
    /// True iff `page * page_size < total`.
    pub has_more: bool,
}

impl ProductPage {
    /// The empty page: no items, zero total, nothing more to load.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            has_more: false,
        }
    }
}
