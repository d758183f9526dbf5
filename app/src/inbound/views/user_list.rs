//! User list view mounted at `/`.

use std::future::Future;

use crate::domain::{User, UserStore, UsersState};

/// Lists every user with the admin tally.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserListView;

impl UserListView {
    /// Load users when the view is shown.
    ///
    /// Revisiting the view after the first load does not refetch.
    pub fn mount(self, store: &UserStore) -> impl Future<Output = ()> + Send + use<> {
        store.fetch_users()
    }

    /// Text rendering of `state`.
    #[must_use]
    pub fn render(self, state: &UsersState) -> String {
        let users = state.users();
        let mut lines = vec![format!(
            "Users ({} total, {} admin)",
            users.len(),
            state.admin_count()
        )];
        if state.loading() {
            lines.push("Loading users...".to_owned());
        }
        if let Some(error) = state.error() {
            lines.push(format!("Error: {error}"));
        }
        lines.extend(users.iter().map(render_row));
        lines.join("\n")
    }
}

fn render_row(user: &User) -> String {
    format!(
        "#{} {} <{}> {}",
        user.id(),
        user.name(),
        user.email(),
        user.role()
    )
}
