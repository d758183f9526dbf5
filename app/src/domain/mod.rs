//! Domain primitives, the user store and its ports.
//!
//! Public surface:
//! - User, NewUser, UserId, UserRole: the user entity and its parts.
//! - UserIdSource: clock-derived identifier allocator.
//! - UserStore, UsersState, FetchPolicy: the client-side state container.
//! - StoreError: failures surfaced on the store's `error` field.
//! - ports: data access and latency traits implemented by adapters.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_store;

pub use self::error::StoreError;
pub use self::user::{NewUser, User, UserId, UserIdSource, UserRole, UserValidationError};
pub use self::user_store::{FetchPolicy, UserStore, UsersState};
