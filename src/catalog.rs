//! The catalog service boundary.
//!
//! The search coordinator consumes the remote product/category store through
//! the [`CatalogService`] trait and nothing else: transport, storage, and
//! authentication all live behind it. [`InMemoryCatalog`] is the reference
//! implementation, used by the test suite and by consumers that hold the
//! full catalog locally.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::engine;
use crate::error::SearchError;
use crate::models::{Category, FilterSet, Product, ProductPage, SortSpec};

/// Data-fetch capability implemented by the external catalog service.
///
/// # Contract
///
/// * `fetch_products` returns one page of the filtered, sorted collection
///   with `total` and `has_more` metadata. `page` is 1-based.
/// * `fetch_categories` returns the category facets; it is called once at
///   coordinator initialization and its failure is non-fatal.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use catalog_search::catalog::CatalogService;
/// use catalog_search::error::SearchError;
/// use catalog_search::models::{Category, FilterSet, ProductPage, SortSpec};
///
/// pub struct RemoteCatalog {
///     base_url: String,
/// }
///
/// #[async_trait]
/// impl CatalogService for RemoteCatalog {
///     async fn fetch_products(
///         &self,
///         filters: &FilterSet,
///         sort: SortSpec,
///         page: usize,
///         page_size: usize,
///     ) -> Result<ProductPage, SearchError> {
///         // ... issue the request and map transport errors to
///         // SearchError::Fetch with the original message preserved
///         # let _ = (filters, sort, page, page_size, &self.base_url);
///         Ok(ProductPage::empty())
///     }
///
///     async fn fetch_categories(&self) -> Result<Vec<Category>, SearchError> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch one page of products matching `filters`, ordered by `sort`.
    async fn fetch_products(
        &self,
        filters: &FilterSet,
        sort: SortSpec,
        page: usize,
        page_size: usize,
    ) -> Result<ProductPage, SearchError>;

    /// Fetch the available category facets.
    async fn fetch_categories(&self) -> Result<Vec<Category>, SearchError>;
}

/// In-memory [`CatalogService`] backed by a product vector.
///
/// Delegates paging to [`engine::query`], so it gives exactly the semantics
/// a remote implementation is expected to provide.
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(products),
            categories: RwLock::new(categories),
        }
    }

    /// Load a catalog from a JSON dump: `{"products": [...], "categories": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct Dump {
            products: Vec<Product>,
            #[serde(default)]
            categories: Vec<Category>,
        }
        let dump: Dump = serde_json::from_str(json)?;
        Ok(Self::new(dump.products, dump.categories))
    }

    /// Replace the product collection, e.g. after a catalog refresh.
    pub fn replace_products(&self, products: Vec<Product>) {
        *self.products.write().unwrap() = products;
    }

    /// Snapshot of the full collection, for the recommendation scorer.
    pub fn products(&self) -> Vec<Product> {
        self.products.read().unwrap().clone()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn fetch_products(
        &self,
        filters: &FilterSet,
        sort: SortSpec,
        page: usize,
        page_size: usize,
    ) -> Result<ProductPage, SearchError> {
        let products = self.products.read().unwrap();
        engine::query(&products, filters, sort, page, page_size)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, SearchError> {
        Ok(self.categories.read().unwrap().clone())
    }
}
