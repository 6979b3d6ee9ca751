use std::sync::Arc;

use axum::Router;

use crate::Recommender;

mod health;
mod predict;

// ---

pub fn router(recommender: Arc<Recommender>) -> Router {
    // ---
    Router::new()
        .merge(predict::router())
        .merge(health::router())
        .with_state(recommender)
}
