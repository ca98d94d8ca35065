//! Filter/sort/paginate query engine.
//!
//! The engine is a pure function over its inputs, with no shared state, so
//! it is safely callable from any number of coordinators concurrently.
//!
//! # Query pipeline
//!
//! 1. Apply the [`FilterSet`] predicates conjunctively.
//! 2. Sort the filtered set with the [`SortSpec`] comparator.
//! 3. Slice out `[(page-1)*page_size, page*page_size)`.
//! 4. Report `total` (filtered size) and `has_more`
//!    (`page * page_size < total`).
//!
//! Ties under the comparator are not broken by a secondary key; they keep
//! their input order, which is deterministic because `slice::sort_by` is a
//! stable sort.

use std::cmp::Ordering;

use crate::error::SearchError;
use crate::models::{FilterSet, Product, ProductPage, SortDirection, SortField, SortSpec};

/// Run a filtered, sorted, paginated query over a product collection.
///
/// `page` is 1-based. A `page` or `page_size` of zero is a precondition
/// violation and fails with [`SearchError::InvalidArgument`] rather than
/// being clamped. An empty filtered set is not an error: it yields an empty
/// page with `total = 0` and `has_more = false`, including for pages past
/// the end.
pub fn query(
    collection: &[Product],
    filters: &FilterSet,
    sort: SortSpec,
    page: usize,
    page_size: usize,
) -> Result<ProductPage, SearchError> {
    if page == 0 {
        return Err(SearchError::invalid_argument("page must be >= 1"));
    }
    if page_size == 0 {
        return Err(SearchError::invalid_argument("page_size must be >= 1"));
    }

    let mut matched: Vec<&Product> = collection
        .iter()
        .filter(|p| matches_filters(p, filters))
        .collect();

    matched.sort_by(|a, b| compare_products(a, b, sort));

    let total = matched.len();
    let start = (page - 1) * page_size;
    let items: Vec<Product> = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Ok(ProductPage {
        items,
        total,
        has_more: page * page_size < total,
    })
}

/// Evaluate the conjunction of all predicates present in `filters`.
pub fn matches_filters(product: &Product, filters: &FilterSet) -> bool {
    if let Some(q) = &filters.query {
        let needle = q.trim().to_lowercase();
        if !needle.is_empty() && !matches_text(product, &needle) {
            return false;
        }
    }

    if let Some(category) = &filters.category {
        if &product.category != category {
            return false;
        }
    }

    if let Some(min) = filters.min_price {
        if product.price < min {
            return false;
        }
    }

    if let Some(max) = filters.max_price {
        if product.price > max {
            return false;
        }
    }

    if let Some(min_rating) = filters.min_rating {
        if min_rating > 0.0 && product.rating < min_rating {
            return false;
        }
    }

    if let Some(in_stock) = filters.in_stock {
        if product.in_stock != in_stock {
            return false;
        }
    }

    if let Some(is_new) = filters.is_new {
        if product.is_new != is_new {
            return false;
        }
    }

    if let Some(is_featured) = filters.is_featured {
        if product.is_featured != is_featured {
            return false;
        }
    }

    if let Some(is_on_sale) = filters.is_on_sale {
        if product.is_on_sale != is_on_sale {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match over the searchable text fields.
fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || product
            .features
            .iter()
            .any(|f| f.to_lowercase().contains(needle))
}

/// The [`SortSpec`] comparator. Name ordering is case-insensitive;
/// locale-specific collation is out of scope.
pub fn compare_products(a: &Product, b: &Product, sort: SortSpec) -> Ordering {
    let ord = match sort.field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortField::Rating => a.rating.partial_cmp(&b.rating).unwrap_or(Ordering::Equal),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::ReviewCount => a.review_count.cmp(&b.review_count),
    };

    match sort.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}
