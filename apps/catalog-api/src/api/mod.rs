//! API routes module

pub mod health;

use axum::Router;
use domain_categories::{CategoryService, PgCategoryRepository};
use domain_products::{PgProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let categories = CategoryService::new(
        PgCategoryRepository::new(state.db.clone()),
        products.clone(),
    );

    Router::new()
        .nest("/categories", domain_categories::handlers::router(categories))
        .nest("/products", domain_products::handlers::router(products))
}
