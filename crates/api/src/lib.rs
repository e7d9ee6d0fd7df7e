//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the working state
//! - Raw record store proxy routes
//! - Error responses

pub mod error;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::Router;
use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracker_core::state::WorkingState;
use tracker_shared::AppError;
use tracker_store::TrackerRepository;

use crate::error::ApiResult;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loads and saves the working state.
    pub repository: TrackerRepository,
    state: Arc<RwLock<WorkingState>>,
    mutations: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates the shared state around an already loaded working state.
    #[must_use]
    pub fn new(repository: TrackerRepository, initial: WorkingState) -> Self {
        Self {
            repository,
            state: Arc::new(RwLock::new(initial)),
            mutations: Arc::new(Mutex::new(())),
        }
    }

    /// Read access to the current working state.
    pub async fn current(&self) -> RwLockReadGuard<'_, WorkingState> {
        self.state.read().await
    }

    /// Applies a change: builds the next state, persists it, then swaps it in.
    ///
    /// Mutations run one at a time. If the change or the save fails, the
    /// current state is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the change's error, or a store error if the save fails.
    pub async fn mutate<T, F>(&self, change: F) -> ApiResult<T>
    where
        F: FnOnce(&WorkingState) -> Result<(WorkingState, T), AppError>,
    {
        let _serialized = self.mutations.lock().await;

        let (next, output) = {
            let current = self.state.read().await;
            change(&current)?
        };

        let saved = self.repository.persist(next).await?;
        *self.state.write().await = saved;
        Ok(output)
    }

    /// Reloads roster and document from the collaborators.
    ///
    /// # Errors
    ///
    /// Returns a store error if either collaborator fails; the current state
    /// is then kept.
    pub async fn reload(&self) -> ApiResult<WorkingState> {
        let _serialized = self.mutations.lock().await;

        let fresh = self.repository.load_state().await?;
        *self.state.write().await = fresh.clone();
        Ok(fresh)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .merge(routes::proxy::routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
