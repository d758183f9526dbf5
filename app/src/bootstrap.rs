//! Composition root.
//!
//! Builds the single [`UserStore`] for an application run, wires it to the
//! simulated data layer and hands it to the router. Nothing else constructs
//! a store, so every view observes the same state for the whole run.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{LatencySleeper, TokioSleeper};
use crate::domain::{UserIdSource, UserStore, UserValidationError};
use crate::inbound::views::{CreateUserForm, CreateUserView};
use crate::inbound::{NavigationError, RouteName, Router};
use crate::outbound::SimulatedUsersApi;
use crate::settings::AppSettings;

/// Errors surfaced to the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The requested path is not routed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// The creation form could not be turned into a user.
    #[error("invalid user form: {0}")]
    InvalidForm(#[from] UserValidationError),
}

/// Store and router for one application run.
#[derive(Debug)]
pub struct AppContext {
    store: UserStore,
    router: Router,
}

impl AppContext {
    /// Wire the application with the wall clock and real delays.
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::with_runtime(settings, Arc::new(DefaultClock), Arc::new(TokioSleeper))
    }

    /// Wire the application with an explicit clock and sleeper.
    pub fn with_runtime(
        settings: &AppSettings,
        clock: Arc<dyn Clock>,
        sleeper: Arc<dyn LatencySleeper>,
    ) -> Self {
        let ids = Arc::new(UserIdSource::new(clock));
        let api = Arc::new(SimulatedUsersApi::new(
            Arc::clone(&ids),
            sleeper,
            settings.latency(),
        ));
        let policy = settings.fetch_policy();
        info!(latency = ?settings.latency(), policy = ?policy, "user directory wired");
        Self {
            store: UserStore::new(api, ids, policy),
            router: Router::new(),
        }
    }

    /// The application's user store.
    #[must_use]
    pub const fn store(&self) -> &UserStore {
        &self.store
    }

    /// The application's router.
    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Visit `path`, wait for its mount hook and render the result.
    ///
    /// # Errors
    /// Returns [`AppError::Navigation`] for unknown paths.
    pub async fn visit(&self, path: &str) -> Result<String, AppError> {
        let view = self.router.visit(path, &self.store).await?;
        Ok(view.render(&self.store.snapshot()))
    }

    /// Submit `form` through the creation view and wait for confirmation.
    ///
    /// A rejected create is not an error here; it shows up on the store's
    /// `error` field.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidForm`] when the form is rejected before
    /// submission.
    pub async fn create_user(&self, form: CreateUserForm) -> Result<(), AppError> {
        self.router.navigate(RouteName::CreateUser.path())?;
        CreateUserView.submit(&self.store, form)?.await;
        Ok(())
    }
}
