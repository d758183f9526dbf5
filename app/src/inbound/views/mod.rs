//! Views driving the user store.
//!
//! Views only read store snapshots and call the store's public actions.

mod create_user;
mod user_list;

pub use create_user::{CreateUserForm, CreateUserView};
pub use user_list::UserListView;
