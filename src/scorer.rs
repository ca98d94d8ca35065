//! Relevance-scoring recommender.
//!
//! Stateless, pure functions over a product collection. Each call builds a
//! transient scored candidate list, sorts it descending (stable, so ties
//! keep input order), and returns the top `limit` products. Nothing here
//! mutates the collection or holds state between calls.

use std::cmp::Ordering;

use crate::config::ScoringConfig;
use crate::models::Product;

/// Weights for the related-product score, decoupled from application config.
///
/// `score = category_weight * (same category)
///        + subcategory_weight * (same subcategory)
///        + tag_weight * |tag intersection|`
#[derive(Debug, Clone)]
pub struct RecommendationParams {
    pub category_weight: f64,
    pub subcategory_weight: f64,
    pub tag_weight: f64,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            category_weight: 3.0,
            subcategory_weight: 2.0,
            tag_weight: 1.0,
        }
    }
}

impl From<&ScoringConfig> for RecommendationParams {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            category_weight: config.category_weight,
            subcategory_weight: config.subcategory_weight,
            tag_weight: config.tag_weight,
        }
    }
}

/// Products related to `product_id`, best matches first.
///
/// The source product is excluded from the candidates. Subcategory only
/// counts when both products actually carry one; two products without
/// subcategories share no subcategory signal. An unknown `product_id`
/// returns an empty list rather than an error.
pub fn related_to(
    products: &[Product],
    product_id: &str,
    limit: usize,
    params: &RecommendationParams,
) -> Vec<Product> {
    let Some(source) = products.iter().find(|p| p.id == product_id) else {
        return Vec::new();
    };

    let mut scored: Vec<(f64, &Product)> = products
        .iter()
        .filter(|p| p.id != product_id)
        .map(|p| {
            let mut score = 0.0;
            if p.category == source.category {
                score += params.category_weight;
            }
            if p.subcategory.is_some() && p.subcategory == source.subcategory {
                score += params.subcategory_weight;
            }
            let shared_tags = p.tags.iter().filter(|t| source.tags.contains(t)).count();
            score += shared_tags as f64 * params.tag_weight;
            (score, p)
        })
        .collect();

    take_top(scored.as_mut_slice(), limit)
}

/// Featured products, highest-rated first.
pub fn featured(products: &[Product], limit: usize) -> Vec<Product> {
    let mut scored: Vec<(f64, &Product)> = products
        .iter()
        .filter(|p| p.is_featured)
        .map(|p| (f64::from(p.rating), p))
        .collect();
    take_top(scored.as_mut_slice(), limit)
}

/// New arrivals, most recently created first.
pub fn new_arrivals(products: &[Product], limit: usize) -> Vec<Product> {
    let mut scored: Vec<(f64, &Product)> = products
        .iter()
        .filter(|p| p.is_new)
        .map(|p| (p.created_at.timestamp() as f64, p))
        .collect();
    take_top(scored.as_mut_slice(), limit)
}

/// On-sale products, steepest discount first.
///
/// Requires both the `is_on_sale` flag and a positive `original_price`;
/// a flagged product without one is malformed data and is excluded, not an
/// error. Discount is `(original - price) / original`.
pub fn on_sale(products: &[Product], limit: usize) -> Vec<Product> {
    let mut scored: Vec<(f64, &Product)> = products
        .iter()
        .filter(|p| p.is_on_sale)
        .filter_map(|p| {
            let original = p.original_price?;
            if original <= 0.0 {
                return None;
            }
            Some(((original - p.price) / original, p))
        })
        .collect();
    take_top(scored.as_mut_slice(), limit)
}

/// Stable descending sort by score, then clone out the first `limit`.
fn take_top(scored: &mut [(f64, &Product)], limit: usize) -> Vec<Product> {
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored
        .iter()
        .take(limit)
        .map(|(_, p)| (*p).clone())
        .collect()
}
