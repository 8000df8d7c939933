use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Parent category not found: {0}")]
    ParentNotFound(String),

    #[error("Category with label '{0}' already exists")]
    DuplicateLabel(String),

    #[error("Category {0} cannot be its own parent")]
    SelfParent(String),

    #[error("Setting parent {0} would create a cycle")]
    CircularParent(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CategoryError::ParentNotFound(id) => {
                AppError::NotFound(format!("Parent category {} not found", id))
            }
            CategoryError::DuplicateLabel(label) => {
                AppError::Conflict(format!("Category with label '{}' already exists", label))
            }
            CategoryError::SelfParent(id) => {
                AppError::Conflict(format!("Category {} cannot be its own parent", id))
            }
            CategoryError::CircularParent(id) => {
                AppError::Conflict(format!("Setting parent {} would create a cycle", id))
            }
            CategoryError::Validation(msg) => AppError::UnprocessableEntity(msg),
            CategoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
