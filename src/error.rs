use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn not_found(label: &str) -> Self {
        CatalogError::NotFound(format!("{} not found", label))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let CatalogError::Storage(e) = &self {
            log::error!("Request failed: {:#}", e);
        }

        (status, Html(views::error_page(status, &self.to_string()))).into_response()
    }
}
