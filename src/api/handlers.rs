use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::logic::{catalog_counts, crud, FormFields, Outcome};
use crate::model::Id;
use crate::store::traits::DocumentStore;
use crate::views::{self, EntityView};

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

fn respond<E: EntityView>(outcome: Outcome<E>) -> Response {
    match outcome {
        Outcome::Render(page) => Html(views::render(&page)).into_response(),
        Outcome::Redirect(to) => Redirect::to(&to).into_response(),
    }
}

/// GET /catalog/
pub async fn index<S: DocumentStore>(
    State(store): State<AppState<S>>,
) -> Result<Html<String>, CatalogError> {
    let counts = catalog_counts(&*store).await?;
    Ok(Html(views::index_page(&counts)))
}

/// GET /catalog/{entity}s
pub async fn list<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
) -> Result<Html<String>, CatalogError> {
    let page = crud::list::<E, S>(&*store).await?;
    Ok(Html(views::render(&page)))
}

/// GET /catalog/{entity}/{id}
pub async fn detail<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Html<String>, CatalogError> {
    let page = crud::detail::<E, S>(&*store, &id).await?;
    Ok(Html(views::render(&page)))
}

/// GET /catalog/{entity}/create
pub async fn create_form<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
) -> Result<Html<String>, CatalogError> {
    let page = crud::create_form::<E, S>(&*store).await?;
    Ok(Html(views::render(&page)))
}

/// POST /catalog/{entity}/create
pub async fn create<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let outcome = crud::create::<E, S>(&*store, &FormFields::from(fields)).await?;
    Ok(respond(outcome))
}

/// GET /catalog/{entity}/{id}/update
pub async fn update_form<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Html<String>, CatalogError> {
    let page = crud::update_form::<E, S>(&*store, &id).await?;
    Ok(Html(views::render(&page)))
}

/// POST /catalog/{entity}/{id}/update
pub async fn update<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let outcome = crud::update::<E, S>(&*store, &id, &FormFields::from(fields)).await?;
    Ok(respond(outcome))
}

/// GET /catalog/{entity}/{id}/delete
pub async fn delete_form<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Response, CatalogError> {
    let outcome = crud::delete_form::<E, S>(&*store, &id).await?;
    Ok(respond(outcome))
}

/// POST /catalog/{entity}/{id}/delete
pub async fn delete<S: DocumentStore, E: EntityView>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, CatalogError> {
    let outcome = crud::delete::<E, S>(&*store, &id, &FormFields::from(fields)).await?;
    Ok(respond(outcome))
}
