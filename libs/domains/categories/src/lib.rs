//! Categories Domain
//!
//! Categories form a tree: each category optionally references a parent, and
//! the read side assembles the full tree with per-node product counts. Write
//! operations enforce the integrity rules (unique labels, existing parents,
//! no self-parenting or direct two-node cycles).
//!
//! The crate is layered handlers -> service -> repository (trait + in-memory
//! + Postgres implementations) -> models/entity.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{
//!     handlers,
//!     repository::InMemoryCategoryRepository,
//!     service::CategoryService,
//! };
//! use domain_products::{repository::InMemoryProductRepository, service::ProductService};
//!
//! let products = ProductService::new(InMemoryProductRepository::new());
//! let service = CategoryService::new(InMemoryCategoryRepository::new(), products);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CategoryError, CategoryResult};
pub use models::{Category, CategoryTreeNode, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
