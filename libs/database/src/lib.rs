//! Database library providing the PostgreSQL connector and repository
//! utilities shared by the domain crates.

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
pub use repository::BaseRepository;
