//! Client-side user state container.
//!
//! [`UserStore`] owns the authoritative list of users for one application
//! run, together with a loading flag and the last error. Views read the
//! state through [`UserStore::snapshot`] or react to changes through
//! [`UserStore::subscribe`], and mutate it only through the two actions:
//!
//! - [`UserStore::fetch_users`] loads the list once and then short-circuits.
//! - [`UserStore::add_user`] appends optimistically and rolls back on failure.
//!
//! Both actions perform their synchronous part when called and return a
//! future for the part that waits on the data layer. The optimistic append
//! is therefore observable before the returned future is first polled.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::ports::UsersApi;
use crate::domain::{NewUser, StoreError, User, UserId, UserIdSource};

/// How overlapping [`UserStore::fetch_users`] calls are treated before the
/// first load completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Every call made while the list is empty issues its own request.
    #[default]
    Permissive,
    /// A call made while a fetch is in flight waits for that fetch instead
    /// of issuing another request.
    SingleFlight,
}

/// Point-in-time view of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    users: Vec<User>,
    loading: bool,
    error: Option<StoreError>,
}

impl UsersState {
    /// Users in insertion order; newest last.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Last recorded failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<StoreError> {
        self.error
    }

    /// Number of users holding the admin role.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_admin()).count()
    }
}

enum FetchPlan {
    Skip,
    Join,
    Load(LoadingReset),
}

struct StoreInner {
    api: Arc<dyn UsersApi>,
    ids: Arc<UserIdSource>,
    policy: FetchPolicy,
    state: watch::Sender<UsersState>,
}

/// Handle to the user state container.
///
/// Clones share the same state. Build exactly one store per application run
/// and pass clones to whatever needs it.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<StoreInner>,
}

impl UserStore {
    /// Create an empty store backed by `api`.
    ///
    /// `ids` supplies the temporary identifiers given to optimistic entries.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use user_directory::domain::ports::FixtureUsersApi;
    /// use user_directory::domain::{FetchPolicy, UserIdSource, UserStore};
    ///
    /// let store = UserStore::new(
    ///     Arc::new(FixtureUsersApi),
    ///     Arc::new(UserIdSource::new(Arc::new(DefaultClock))),
    ///     FetchPolicy::Permissive,
    /// );
    /// assert!(store.users().is_empty());
    /// assert!(!store.loading());
    /// ```
    pub fn new(api: Arc<dyn UsersApi>, ids: Arc<UserIdSource>, policy: FetchPolicy) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                api,
                ids,
                policy,
                state: watch::Sender::new(UsersState::default()),
            }),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> UsersState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UsersState> {
        self.inner.state.subscribe()
    }

    /// Users in insertion order.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.inner.state.borrow().users.clone()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Last recorded failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<StoreError> {
        self.inner.state.borrow().error
    }

    /// Number of users currently holding the admin role.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.inner.state.borrow().admin_count()
    }

    /// Load the user list unless it is already populated.
    ///
    /// A non-empty list makes this a no-op that never touches the data
    /// layer. Otherwise `loading` is raised and any previous error cleared
    /// before this method returns; the returned future performs the request,
    /// then replaces the list on success or records
    /// [`StoreError::FetchFailed`] on failure. `loading` drops back to
    /// `false` when the future completes or is dropped.
    pub fn fetch_users(&self) -> impl Future<Output = ()> + Send + use<> {
        let plan = self.begin_fetch();
        let store = self.clone();
        async move {
            match plan {
                FetchPlan::Skip => debug!("users already loaded; fetch skipped"),
                FetchPlan::Join => store.wait_for_fetch().await,
                FetchPlan::Load(reset) => store.load(reset).await,
            }
        }
    }

    /// Append `candidate` optimistically, then confirm it with the data layer.
    ///
    /// The entry, carrying a temporary identifier, is visible as soon as this
    /// method returns. If the returned future observes a failed create, the
    /// entry is removed again and [`StoreError::CreateFailed`] recorded.
    /// A successful create leaves the entry as it is, temporary identifier
    /// included. `loading` is never raised.
    pub fn add_user(&self, candidate: NewUser) -> impl Future<Output = ()> + Send + use<> {
        let temp_id = self.inner.ids.next_id();
        let optimistic = candidate.clone().into_user(temp_id);
        self.inner
            .state
            .send_modify(|state| state.users.push(optimistic));
        debug!(temp_id = %temp_id, "optimistic user appended");

        let store = self.clone();
        async move {
            match store.inner.api.create_user(candidate).await {
                Ok(confirmed) => debug!(
                    temp_id = %temp_id,
                    confirmed_id = %confirmed.id(),
                    "user creation confirmed"
                ),
                Err(error) => {
                    warn!(temp_id = %temp_id, error = %error, "user creation failed; rolling back");
                    store.rollback(temp_id);
                }
            }
        }
    }

    fn begin_fetch(&self) -> FetchPlan {
        let policy = self.inner.policy;
        let mut join = false;
        let started = self.inner.state.send_if_modified(|state| {
            if !state.users.is_empty() {
                return false;
            }
            if state.loading && policy == FetchPolicy::SingleFlight {
                join = true;
                return false;
            }
            state.loading = true;
            state.error = None;
            true
        });
        if started {
            FetchPlan::Load(LoadingReset::armed(Arc::clone(&self.inner)))
        } else if join {
            FetchPlan::Join
        } else {
            FetchPlan::Skip
        }
    }

    async fn load(&self, mut reset: LoadingReset) {
        let outcome = self.inner.api.list_users().await;
        self.inner.state.send_modify(|state| {
            match outcome {
                Ok(users) => {
                    debug!(count = users.len(), "users fetched");
                    state.users = users;
                }
                Err(error) => {
                    warn!(error = %error, "user fetch failed");
                    state.error = Some(StoreError::FetchFailed);
                }
            }
            state.loading = false;
        });
        reset.disarm();
    }

    async fn wait_for_fetch(&self) {
        let mut receiver = self.subscribe();
        // The store itself holds the sender, so the channel cannot close here.
        let settled = receiver.wait_for(|state| !state.loading).await.is_ok();
        debug!(settled, "joined in-flight user fetch");
    }

    fn rollback(&self, temp_id: UserId) {
        self.inner.state.send_modify(|state| {
            state.users.retain(|user| user.id() != temp_id);
            state.error = Some(StoreError::CreateFailed);
        });
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("policy", &self.inner.policy)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Lowers `loading` if a fetch future is dropped before it settles,
/// including when it is never polled.
struct LoadingReset {
    inner: Arc<StoreInner>,
    armed: bool,
}

impl LoadingReset {
    fn armed(inner: Arc<StoreInner>) -> Self {
        Self { inner, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingReset {
    fn drop(&mut self) {
        if self.armed {
            self.inner
                .state
                .send_if_modified(|state| std::mem::replace(&mut state.loading, false));
        }
    }
}
