//! # Catalog Search
//!
//! Product search, filtering, and recommendation engine for an e-commerce
//! storefront.
//!
//! The crate is the algorithmic core behind a catalog UI: a pure
//! filter/sort/paginate query engine, a stateful search coordinator that
//! debounces free-text input and keeps pagination stable under
//! append-vs-replace semantics, and a relevance-scoring recommender for
//! related/featured/new/on-sale product rails. The remote catalog store is
//! consumed through the [`catalog::CatalogService`] trait; transport, auth,
//! and rendering live outside this crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  setters / load_more  ┌──────────────────┐
//! │  UI layer    │──────────────────────▶│ SearchCoordinator │
//! │ (not here)   │◀──────────────────────│  Idle/Searching/  │
//! └──────────────┘   watch<SearchState>  │ LoadingMore/Error │
//!                                        └─────────┬─────────┘
//!                                                  │ fetch_products
//!                                                  ▼
//!                    ┌───────────┐        ┌────────────────┐
//!                    │  scorer   │        │ CatalogService │
//!                    │ (related, │        │ (remote store, │
//!                    │  sale...) │        │  or in-memory) │
//!                    └─────┬─────┘        └───────┬────────┘
//!                          │      engine::query   │
//!                          ▼                      ▼
//!                    ┌─────────────────────────────────┐
//!                    │   filter / sort / paginate      │
//!                    └─────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use catalog_search::catalog::InMemoryCatalog;
//! use catalog_search::config::SearchConfig;
//! use catalog_search::coordinator::SearchCoordinator;
//!
//! # async fn example() {
//! let catalog = Arc::new(InMemoryCatalog::default());
//! let coordinator = SearchCoordinator::new(catalog, SearchConfig::default());
//! coordinator.init().await;
//! coordinator.set_category(Some("Hair Masks".to_string()));
//! let state = coordinator.snapshot();
//! # let _ = state;
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Products, filters, sort specs, result pages |
//! | [`engine`] | Pure filter/sort/paginate query function |
//! | [`coordinator`] | Stateful, debounced search controller |
//! | [`scorer`] | Related/featured/new/on-sale recommendations |
//! | [`catalog`] | Catalog service trait and in-memory implementation |
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Error taxonomy |

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod models;
pub mod scorer;
