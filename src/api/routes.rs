use axum::{response::Redirect, routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::model::{Brand, Shoe, ShoeInstance, ShoeType};
use crate::store::traits::DocumentStore;
use crate::views::EntityView;

pub fn create_router<S: DocumentStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        // Health check
        .route("/health", get(handlers::health_check))
        // Catalog home page
        .route("/catalog", get(handlers::index::<S>))
        .route("/catalog/", get(handlers::index::<S>))
        .merge(entity_routes::<S, Shoe>())
        .merge(entity_routes::<S, Brand>())
        .merge(entity_routes::<S, ShoeType>())
        .merge(entity_routes::<S, ShoeInstance>())
        .nest_service("/stylesheets", ServeDir::new("public/stylesheets"))
}

/// The list/detail/create/update/delete routes of one entity.
fn entity_routes<S: DocumentStore + 'static, E: EntityView>() -> Router<Arc<S>> {
    let base = format!("/catalog/{}", E::SLUG);
    Router::new()
        // NOTE: /create must be registered before /:id
        .route(
            &format!("{}/create", base),
            get(handlers::create_form::<S, E>).post(handlers::create::<S, E>),
        )
        .route(
            &format!("{}/:id/delete", base),
            get(handlers::delete_form::<S, E>).post(handlers::delete::<S, E>),
        )
        .route(
            &format!("{}/:id/update", base),
            get(handlers::update_form::<S, E>).post(handlers::update::<S, E>),
        )
        .route(&format!("{}/:id", base), get(handlers::detail::<S, E>))
        .route(&format!("{}s", base), get(handlers::list::<S, E>))
}
