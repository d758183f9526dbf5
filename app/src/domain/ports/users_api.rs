//! Driven port for the user data access layer.
//!
//! The state container talks to users only through this trait, so swapping
//! the simulated adapter for real network calls leaves the store untouched.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewUser, User, UserId, UserRole};

/// Errors raised by user data access adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsersApiError {
    /// The backing service could not be reached.
    #[error("user service unavailable: {message}")]
    Unavailable {
        /// Adapter-specific detail.
        message: String,
    },
    /// The service refused the request.
    #[error("user request rejected: {message}")]
    Rejected {
        /// Adapter-specific detail.
        message: String,
    },
}

impl UsersApiError {
    /// Build an [`UsersApiError::Unavailable`] error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Build a [`UsersApiError::Rejected`] error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Data access operations consumed by the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Return every known user, in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, UsersApiError>;

    /// Persist `candidate` and return it with its assigned identifier.
    async fn create_user(&self, candidate: NewUser) -> Result<User, UsersApiError>;
}

/// Users present before any create call.
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(
            UserId::new(1),
            "Alice Johnson",
            "alice@example.com",
            UserRole::Admin,
        ),
        User::new(
            UserId::new(2),
            "Bob Smith",
            "bob@example.com",
            UserRole::Editor,
        ),
        User::new(
            UserId::new(3),
            "Charlie Brown",
            "charlie@example.com",
            UserRole::Viewer,
        ),
    ]
}

/// Zero-latency fixture for tests that do not exercise data access.
///
/// Lists the seed users and echoes created users back with id `0`; nothing
/// is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersApi;

#[async_trait]
impl UsersApi for FixtureUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, UsersApiError> {
        Ok(seed_users())
    }

    async fn create_user(&self, candidate: NewUser) -> Result<User, UsersApiError> {
        Ok(candidate.into_user(UserId::new(0)))
    }
}
