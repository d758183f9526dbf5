//! Two-route navigation layer.
//!
//! ```text
//! /             user-list    UserListView
//! /create-user  create-user  CreateUserView
//! ```
//!
//! Paths match exactly; there are no parameters, guards or redirects. A
//! view is constructed the first time its route is visited and reused
//! afterwards.

use std::future::Future;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use crate::domain::{UserStore, UsersState};
use crate::inbound::views::{CreateUserView, UserListView};

/// Named application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// `/`: the user list.
    UserList,
    /// `/create-user`: the creation form.
    CreateUser,
}

impl RouteName {
    /// Every route, in registration order.
    pub const ALL: [Self; 2] = [Self::UserList, Self::CreateUser];

    /// URL path the route is served at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::UserList => "/",
            Self::CreateUser => "/create-user",
        }
    }

    /// Stable route name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserList => "user-list",
            Self::CreateUser => "create-user",
        }
    }
}

/// Navigation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No route is registered for the path.
    #[error("no route matches path {path:?}")]
    NotFound {
        /// The requested path.
        path: String,
    },
}

/// View currently shown for a route.
#[derive(Debug, Clone, Copy)]
pub enum ActiveView {
    /// The user list.
    UserList(UserListView),
    /// The creation form.
    CreateUser(CreateUserView),
}

impl ActiveView {
    fn load(route: RouteName) -> Self {
        match route {
            RouteName::UserList => Self::UserList(UserListView),
            RouteName::CreateUser => Self::CreateUser(CreateUserView),
        }
    }

    /// Route this view is registered under.
    #[must_use]
    pub const fn route(&self) -> RouteName {
        match self {
            Self::UserList(_) => RouteName::UserList,
            Self::CreateUser(_) => RouteName::CreateUser,
        }
    }

    /// Run the view's mount hook against `store`.
    ///
    /// Synchronous store effects happen before this returns.
    pub fn mount(&self, store: &UserStore) -> impl Future<Output = ()> + Send + use<> {
        let fetch = match self {
            Self::UserList(view) => Some(view.mount(store)),
            Self::CreateUser(_) => None,
        };
        async move {
            if let Some(fetch) = fetch {
                fetch.await;
            }
        }
    }

    /// Text rendering of `state` through this view.
    #[must_use]
    pub fn render(&self, state: &UsersState) -> String {
        match self {
            Self::UserList(view) => view.render(state),
            Self::CreateUser(view) => view.render(state),
        }
    }
}

/// Path-to-view router with lazily constructed views.
#[derive(Debug, Default)]
pub struct Router {
    user_list: OnceLock<ActiveView>,
    create_user: OnceLock<ActiveView>,
}

impl Router {
    /// Create a router with no views loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `path` against the route table.
    ///
    /// # Errors
    /// Returns [`NavigationError::NotFound`] when no route has exactly this
    /// path.
    pub fn resolve(path: &str) -> Result<RouteName, NavigationError> {
        RouteName::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| NavigationError::NotFound {
                path: path.to_owned(),
            })
    }

    /// Resolve `path` and return its view, constructing it on first visit.
    ///
    /// # Errors
    /// Returns [`NavigationError::NotFound`] for unknown paths.
    pub fn navigate(&self, path: &str) -> Result<ActiveView, NavigationError> {
        let route = Self::resolve(path)?;
        let view = *self.slot(route).get_or_init(|| {
            debug!(route = route.name(), "loading view");
            ActiveView::load(route)
        });
        debug!(route = route.name(), path, "navigated");
        Ok(view)
    }

    /// Navigate to `path`, mount the view against `store` and wait for the
    /// mount hook to settle.
    ///
    /// # Errors
    /// Returns [`NavigationError::NotFound`] for unknown paths.
    pub async fn visit(&self, path: &str, store: &UserStore) -> Result<ActiveView, NavigationError> {
        let view = self.navigate(path)?;
        view.mount(store).await;
        Ok(view)
    }

    /// Whether the view for `route` has been constructed.
    #[must_use]
    pub fn is_loaded(&self, route: RouteName) -> bool {
        self.slot(route).get().is_some()
    }

    const fn slot(&self, route: RouteName) -> &OnceLock<ActiveView> {
        match route {
            RouteName::UserList => &self.user_list,
            RouteName::CreateUser => &self.create_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockUsersApi;
    use crate::domain::{FetchPolicy, UserIdSource};
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[case("/", RouteName::UserList)]
    #[case("/create-user", RouteName::CreateUser)]
    fn resolve_matches_registered_paths(#[case] path: &str, #[case] expected: RouteName) {
        assert_eq!(Router::resolve(path), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("/users")]
    #[case("/create-user/")]
    #[case("/create-user?role=Admin")]
    #[case("/CREATE-USER")]
    fn resolve_rejects_everything_else(#[case] path: &str) {
        assert_eq!(
            Router::resolve(path),
            Err(NavigationError::NotFound {
                path: path.to_owned()
            })
        );
    }

    #[rstest]
    fn views_load_on_first_navigation_only() {
        let router = Router::new();
        assert!(!router.is_loaded(RouteName::UserList));
        assert!(!router.is_loaded(RouteName::CreateUser));

        let view = router.navigate("/create-user").expect("known route");
        assert_eq!(view.route(), RouteName::CreateUser);
        assert!(router.is_loaded(RouteName::CreateUser));
        assert!(!router.is_loaded(RouteName::UserList));
    }

    #[rstest]
    fn unknown_paths_load_nothing() {
        let router = Router::new();
        assert!(router.navigate("/nope").is_err());
        assert!(RouteName::ALL.iter().all(|route| !router.is_loaded(*route)));
    }

    #[rstest]
    #[tokio::test]
    async fn revisiting_the_list_fetches_once() {
        let mut api = MockUsersApi::new();
        api.expect_list_users()
            .times(1)
            .return_once(|| Ok(crate::domain::ports::seed_users()));
        let store = UserStore::new(
            Arc::new(api),
            Arc::new(UserIdSource::new(Arc::new(DefaultClock))),
            FetchPolicy::Permissive,
        );
        let router = Router::new();

        router.visit("/", &store).await.expect("list view");
        router.visit("/create-user", &store).await.expect("form view");
        router.visit("/", &store).await.expect("list view again");

        assert_eq!(store.users().len(), 3);
    }
}
