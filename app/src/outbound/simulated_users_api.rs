//! In-memory user data access adapter with simulated network latency.
//!
//! Stands in for a remote user service: every call sleeps for a fixed delay
//! before answering from a process-local dataset seeded with three users.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LatencySleeper, UsersApi, UsersApiError, seed_users};
use crate::domain::{NewUser, User, UserIdSource};

/// Default delay before a list call answers.
pub const DEFAULT_LIST_DELAY: Duration = Duration::from_millis(800);
/// Default delay before a create call answers.
pub const DEFAULT_CREATE_DELAY: Duration = Duration::from_millis(500);

/// Simulated round-trip delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Delay applied to [`UsersApi::list_users`].
    pub list: Duration,
    /// Delay applied to [`UsersApi::create_user`].
    pub create: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            list: DEFAULT_LIST_DELAY,
            create: DEFAULT_CREATE_DELAY,
        }
    }
}

/// Mock user service backed by an in-memory vector.
///
/// Never fails. Created users receive identifiers from the shared
/// [`UserIdSource`] and are appended to the dataset, so later list calls
/// include them.
pub struct SimulatedUsersApi {
    users: Mutex<Vec<User>>,
    ids: Arc<UserIdSource>,
    sleeper: Arc<dyn LatencySleeper>,
    latency: SimulatedLatency,
}

impl SimulatedUsersApi {
    /// Build the adapter over the standard seed dataset.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use user_directory::domain::UserIdSource;
    /// use user_directory::domain::ports::ImmediateSleeper;
    /// use user_directory::outbound::{SimulatedLatency, SimulatedUsersApi};
    ///
    /// let api = SimulatedUsersApi::new(
    ///     Arc::new(UserIdSource::new(Arc::new(DefaultClock))),
    ///     Arc::new(ImmediateSleeper),
    ///     SimulatedLatency::default(),
    /// );
    /// assert_eq!(api.len(), 3);
    /// ```
    pub fn new(
        ids: Arc<UserIdSource>,
        sleeper: Arc<dyn LatencySleeper>,
        latency: SimulatedLatency,
    ) -> Self {
        Self::with_users(seed_users(), ids, sleeper, latency)
    }

    /// Build the adapter over an explicit dataset.
    pub fn with_users(
        users: Vec<User>,
        ids: Arc<UserIdSource>,
        sleeper: Arc<dyn LatencySleeper>,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            users: Mutex::new(users),
            ids,
            sleeper,
            latency,
        }
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_users().len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_users().is_empty()
    }

    fn lock_users(&self) -> MutexGuard<'_, Vec<User>> {
        // Critical sections are a single push or clone.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SimulatedUsersApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedUsersApi")
            .field("users", &self.len())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl UsersApi for SimulatedUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, UsersApiError> {
        self.sleeper.sleep(self.latency.list).await;
        let users = self.lock_users().clone();
        debug!(count = users.len(), "simulated list answered");
        Ok(users)
    }

    async fn create_user(&self, candidate: NewUser) -> Result<User, UsersApiError> {
        self.sleeper.sleep(self.latency.create).await;
        let user = candidate.into_user(self.ids.next_id());
        self.lock_users().push(user.clone());
        debug!(id = %user.id(), "simulated create answered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, UserRole};
    use crate::test_support::{fixed_clock, fixture_timestamp};
    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct RecordingSleeper(Mutex<Vec<Duration>>);

    #[async_trait]
    impl LatencySleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.0.lock().expect("sleeper mutex").push(duration);
        }
    }

    #[fixture]
    fn sleeper() -> Arc<RecordingSleeper> {
        Arc::new(RecordingSleeper::default())
    }

    fn make_api(sleeper: Arc<RecordingSleeper>) -> SimulatedUsersApi {
        SimulatedUsersApi::new(
            Arc::new(UserIdSource::new(Arc::new(fixed_clock(fixture_timestamp())))),
            sleeper,
            SimulatedLatency::default(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_seed_users_after_list_delay(sleeper: Arc<RecordingSleeper>) {
        let api = make_api(sleeper.clone());

        let users = api.list_users().await.expect("users list");

        assert_eq!(users, seed_users());
        assert_eq!(
            *sleeper.0.lock().expect("sleeper mutex"),
            vec![Duration::from_millis(800)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_clock_id_and_appends(sleeper: Arc<RecordingSleeper>) {
        let api = make_api(sleeper.clone());
        let candidate = NewUser::new("Dana", "dana@x.com", UserRole::Admin);

        let created = api.create_user(candidate).await.expect("created user");

        assert_eq!(
            created.id(),
            UserId::new(fixture_timestamp().timestamp_millis())
        );
        assert_eq!(created.name(), "Dana");
        assert_eq!(api.len(), 4);
        let users = api.list_users().await.expect("users list");
        assert_eq!(users.last(), Some(&created));
        assert_eq!(
            *sleeper.0.lock().expect("sleeper mutex"),
            vec![Duration::from_millis(500), Duration::from_millis(800)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_returns_a_copy(sleeper: Arc<RecordingSleeper>) {
        let api = make_api(sleeper);

        let mut users = api.list_users().await.expect("users list");
        users.clear();

        assert_eq!(api.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn rapid_creates_receive_distinct_ids(sleeper: Arc<RecordingSleeper>) {
        let api = make_api(sleeper);

        let first = api
            .create_user(NewUser::new("A", "a@x.com", UserRole::Viewer))
            .await
            .expect("first");
        let second = api
            .create_user(NewUser::new("B", "b@x.com", UserRole::Viewer))
            .await
            .expect("second");

        assert_ne!(first.id(), second.id());
    }
}
